//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test, web};

use crate::domain::ports::FixtureLoginService;
use crate::domain::{CustomerMutationService, Error, InvoiceMutationService, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::outbound::cache::InMemoryCacheInvalidator;
use crate::outbound::memory::InMemoryRecords;

/// User id persisted by [`sign_in_for_test`].
pub const TEST_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// In-memory adapters behind an [`HttpState`].
pub struct InMemoryApp {
    pub state: web::Data<HttpState>,
    pub records: Arc<InMemoryRecords>,
    pub cache: Arc<InMemoryCacheInvalidator>,
}

/// Wire every pipeline over fresh in-memory adapters.
pub fn in_memory_app() -> InMemoryApp {
    let records = Arc::new(InMemoryRecords::new());
    let cache = Arc::new(InMemoryCacheInvalidator::new());
    let state = HttpState::new(
        Arc::new(FixtureLoginService),
        Arc::new(InvoiceMutationService::new(
            Arc::clone(&records),
            Arc::clone(&cache),
            Arc::new(mockable::DefaultClock),
        )),
        Arc::new(CustomerMutationService::new(
            Arc::clone(&records),
            Arc::new(crate::domain::ports::FixtureAssetStore::default()),
            Arc::clone(&cache),
        )),
    );
    InMemoryApp {
        state: web::Data::new(state),
        records,
        cache,
    }
}

/// Route handler that marks the caller signed in as [`TEST_USER_ID`].
pub async fn sign_in_for_test(session: SessionContext) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(TEST_USER_ID).map_err(|err| Error::internal(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Pull the session cookie out of a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Request to the `/test/sign-in` route registered by tests.
pub fn sign_in_request() -> test::TestRequest {
    test::TestRequest::get().uri("/test/sign-in")
}
