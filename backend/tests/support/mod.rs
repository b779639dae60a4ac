//! Shared doubles and app wiring for the HTTP integration tests.
//!
//! Integration tests compile as separate crates, so the in-crate test helpers
//! are not visible here. Everything runs in memory; no database, Redis or
//! object store is required.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use async_trait::async_trait;
use mockable::DefaultClock;

use dashboard_backend::Trace;
use dashboard_backend::domain::ports::{
    AssetStore, AssetStoreError, CacheInvalidator, FixtureAssetStore, FixtureLoginService,
    InvoiceRepository, InvoiceRepositoryError,
};
use dashboard_backend::domain::{
    AssetPayload, AssetUrl, CachePath, CustomerDraft, CustomerId, CustomerMutationService,
    CustomerName, CustomerRecord, EmailAddress, InvoiceDraft, InvoiceId, InvoiceMutationService,
    InvoiceRecord, UploadedAsset,
};
use dashboard_backend::inbound::http::customers::create_customer;
use dashboard_backend::inbound::http::invoices::{create_invoice, delete_invoice, update_invoice};
use dashboard_backend::inbound::http::login::login;
use dashboard_backend::inbound::http::mutation_response::form_config;
use dashboard_backend::inbound::http::state::{CustomerPipeline, HttpState, InvoicePipeline};
use dashboard_backend::outbound::cache::InMemoryCacheInvalidator;
use dashboard_backend::outbound::memory::InMemoryRecords;

/// Object store double that counts uploads.
#[derive(Default)]
pub struct CountingAssetStore {
    inner: FixtureAssetStore,
    uploads: AtomicUsize,
}

impl CountingAssetStore {
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AssetStore for CountingAssetStore {
    async fn upload(&self, payload: &AssetPayload) -> Result<UploadedAsset, AssetStoreError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        self.inner.upload(payload).await
    }
}

/// Object store double that always rejects.
pub struct RejectingAssetStore;

#[async_trait]
impl AssetStore for RejectingAssetStore {
    async fn upload(&self, _payload: &AssetPayload) -> Result<UploadedAsset, AssetStoreError> {
        Err(AssetStoreError::rejected(
            403_u16,
            "SignatureDoesNotMatch for bucket avatars",
        ))
    }
}

/// Invoice repository whose every statement fails with a raw driver message.
pub struct BrokenInvoiceRepository;

pub const RAW_DRIVER_MESSAGE: &str = "relation \"invoices\" does not exist";

#[async_trait]
impl InvoiceRepository for BrokenInvoiceRepository {
    async fn insert(&self, _record: &InvoiceRecord) -> Result<(), InvoiceRepositoryError> {
        Err(InvoiceRepositoryError::query(RAW_DRIVER_MESSAGE))
    }

    async fn update(
        &self,
        _id: &InvoiceId,
        _draft: &InvoiceDraft,
    ) -> Result<bool, InvoiceRepositoryError> {
        Err(InvoiceRepositoryError::query(RAW_DRIVER_MESSAGE))
    }

    async fn delete(&self, _id: &InvoiceId) -> Result<bool, InvoiceRepositoryError> {
        Err(InvoiceRepositoryError::query(RAW_DRIVER_MESSAGE))
    }
}

/// Cache double that records how many invoices and customers were stored at
/// the moment each invalidation arrived.
pub struct ObservingCache {
    records: Arc<InMemoryRecords>,
    inner: InMemoryCacheInvalidator,
    seen: Mutex<Vec<(CachePath, usize, usize)>>,
}

impl ObservingCache {
    pub fn new(records: Arc<InMemoryRecords>) -> Self {
        Self {
            records,
            inner: InMemoryCacheInvalidator::new(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// `(path, invoices stored, customers stored)` per invalidation.
    pub fn seen(&self) -> Vec<(CachePath, usize, usize)> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CacheInvalidator for ObservingCache {
    async fn invalidate(&self, path: &CachePath) {
        let snapshot = (
            path.clone(),
            self.records.invoices().len(),
            self.records.customers().len(),
        );
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
        self.inner.invalidate(path).await;
    }
}

/// Handles on the doubles behind one test app.
pub struct Harness {
    pub state: web::Data<HttpState>,
    pub records: Arc<InMemoryRecords>,
    pub cache: Arc<ObservingCache>,
    pub assets: Arc<CountingAssetStore>,
}

impl Harness {
    /// In-memory records, counting object store, observing cache.
    pub fn in_memory() -> Self {
        let records = Arc::new(InMemoryRecords::new());
        let cache = Arc::new(ObservingCache::new(Arc::clone(&records)));
        let assets = Arc::new(CountingAssetStore::default());
        let invoices: Arc<InvoicePipeline> = Arc::new(InvoiceMutationService::new(
            Arc::clone(&records),
            Arc::clone(&cache),
            Arc::new(DefaultClock),
        ));
        let customers: Arc<CustomerPipeline> = Arc::new(CustomerMutationService::new(
            Arc::clone(&records),
            Arc::clone(&assets),
            Arc::clone(&cache),
        ));
        Self {
            state: web::Data::new(HttpState::new(
                Arc::new(FixtureLoginService),
                invoices,
                customers,
            )),
            records,
            cache,
            assets,
        }
    }

    /// Replace the invoice pipeline's repository.
    pub fn with_invoice_repository(mut self, repo: Arc<dyn InvoiceRepository>) -> Self {
        let base = self.state.get_ref().clone();
        let invoices: Arc<InvoicePipeline> = Arc::new(InvoiceMutationService::new(
            repo,
            Arc::clone(&self.cache),
            Arc::new(DefaultClock),
        ));
        self.state = web::Data::new(HttpState::new(
            Arc::new(FixtureLoginService),
            invoices,
            base.customers,
        ));
        self
    }

    /// Replace the customer pipeline's object store.
    pub fn with_asset_store(mut self, assets: Arc<dyn AssetStore>) -> Self {
        let base = self.state.get_ref().clone();
        let customers: Arc<CustomerPipeline> = Arc::new(CustomerMutationService::new(
            Arc::clone(&self.records),
            assets,
            Arc::clone(&self.cache),
        ));
        self.state = web::Data::new(HttpState::new(
            Arc::new(FixtureLoginService),
            base.invoices,
            customers,
        ));
        self
    }

    /// Store a customer directly, bypassing the pipeline.
    pub fn seed_customer(&self, name: &str, email: &str) -> CustomerId {
        let id = CustomerId::random();
        self.records.seed_customer(CustomerRecord::from_draft(
            id,
            CustomerDraft {
                name: CustomerName::new(name).expect("valid name"),
                email: EmailAddress::new(email).expect("valid email"),
            },
            AssetUrl::parse("https://cdn.example.com/seed.png").expect("valid url"),
        ));
        id
    }

    /// The production route table over this harness's state.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
            .cookie_name("session".to_owned())
            .cookie_secure(false)
            .build();
        App::new()
            .app_data(self.state.clone())
            .app_data(form_config())
            .wrap(Trace)
            .service(
                web::scope("")
                    .wrap(session)
                    .service(login)
                    .service(create_invoice)
                    .service(update_invoice)
                    .service(delete_invoice)
                    .service(create_customer),
            )
    }
}

/// Sign in with the fixture credentials and evaluate to the session cookie.
macro_rules! sign_in {
    ($app:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/login")
            .set_form(vec![("username", "admin"), ("password", "password")])
            .to_request();
        let res = actix_web::test::call_service($app, req).await;
        assert!(res.status().is_redirection(), "fixture login should succeed");
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }};
}

const BOUNDARY: &str = "integration-boundary";

/// Build a multipart customer request.
pub fn customer_request(name: &str, email: &str, mime: &str, image: &[u8]) -> test::TestRequest {
    let mut body = Vec::new();
    for (field, value) in [("name", name), ("email", email)] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"userImage\"; filename=\"a\"\r\n\
             Content-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    test::TestRequest::post()
        .uri("/dashboard/customers")
        .insert_header((
            actix_web::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}
