//! Sign-in flow.
//!
//! Malformed credentials are refused the same way a wrong password is, so the
//! form never learns which part was missing. Provider faults are returned as
//! [`Error`] and end the request.

use std::sync::Arc;

use tracing::info;

use crate::domain::ports::LoginService;
use crate::domain::{AuthFailureReason, AuthOutcome, Error, LoginCredentials};

/// Authenticates raw form credentials through a [`LoginService`].
pub struct LoginFlow<L: ?Sized> {
    service: Arc<L>,
}

impl<L: ?Sized> Clone for LoginFlow<L> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<L: ?Sized> LoginFlow<L> {
    /// Create a new flow over `service`.
    pub fn new(service: Arc<L>) -> Self {
        Self { service }
    }
}

impl<L: LoginService + ?Sized> LoginFlow<L> {
    /// Authenticate `username` and `password`.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<AuthOutcome, Error> {
        let credentials = match LoginCredentials::try_from_parts(username, password) {
            Ok(credentials) => credentials,
            Err(err) => {
                info!(reason = %err, "login refused before reaching the provider");
                return Ok(AuthOutcome::Denied(AuthFailureReason::InvalidCredentials));
            }
        };
        let outcome = self.service.authenticate(&credentials).await?;
        if let AuthOutcome::Denied(reason) = outcome {
            info!(username = credentials.username(), ?reason, "login denied");
        }
        Ok(outcome)
    }
}
