//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` and depend only on domain
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::LoginService;
use crate::domain::{InvoiceMutation, LoginFlow, MutationPipeline, RawCustomerForm};

/// Invoice create/update/delete pipeline.
pub type InvoicePipeline = dyn MutationPipeline<Input = InvoiceMutation>;
/// Customer creation pipeline.
pub type CustomerPipeline = dyn MutationPipeline<Input = RawCustomerForm>;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: LoginFlow<dyn LoginService>,
    pub invoices: Arc<InvoicePipeline>,
    pub customers: Arc<CustomerPipeline>,
}

impl HttpState {
    /// Assemble state from the three use-case ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use dashboard_backend::domain::ports::{FixtureAssetStore, FixtureLoginService};
    /// use dashboard_backend::domain::{CustomerMutationService, InvoiceMutationService};
    /// use dashboard_backend::inbound::http::state::HttpState;
    /// use dashboard_backend::outbound::cache::InMemoryCacheInvalidator;
    /// use dashboard_backend::outbound::memory::InMemoryRecords;
    ///
    /// let records = Arc::new(InMemoryRecords::new());
    /// let cache = Arc::new(InMemoryCacheInvalidator::new());
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(InvoiceMutationService::new(
    ///         records.clone(),
    ///         cache.clone(),
    ///         Arc::new(mockable::DefaultClock),
    ///     )),
    ///     Arc::new(CustomerMutationService::new(
    ///         records,
    ///         Arc::new(FixtureAssetStore::default()),
    ///         cache,
    ///     )),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        invoices: Arc<InvoicePipeline>,
        customers: Arc<CustomerPipeline>,
    ) -> Self {
        Self {
            login: LoginFlow::new(login),
            invoices,
            customers,
        }
    }
}
