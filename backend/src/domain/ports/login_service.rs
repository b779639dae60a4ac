//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing identity provider, so HTTP handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AuthFailureReason, AuthOutcome, Error, LoginCredentials, UserId};

/// Domain use-case port for authentication.
///
/// Known refusals are reported as [`AuthOutcome::Denied`]. An `Err` means the
/// provider itself failed and the request cannot be answered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthOutcome, Error>;
}

const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// In-memory authenticator used when no identity provider is configured.
///
/// `admin` / `password` authenticates successfully and produces a fixed user id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthOutcome, Error> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            UserId::new(FIXTURE_USER_ID)
                .map(AuthOutcome::Authenticated)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Ok(AuthOutcome::Denied(AuthFailureReason::InvalidCredentials))
        }
    }
}
