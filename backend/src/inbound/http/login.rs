//! Sign-in handler.
//!
//! ```text
//! POST /login   username=admin&password=password
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;

use crate::domain::AuthOutcome;
use crate::inbound::http::ApiResult;
use crate::inbound::http::mutation_response::FailureBody;
use crate::inbound::http::schemas::{ErrorSchema, FailureBodySchema, LoginFormSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Landing page after a successful sign-in.
pub const DASHBOARD_HOME: &str = "/dashboard";

/// URL-encoded sign-in form. Missing fields decode as empty strings and are
/// refused like wrong credentials.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginFormSchema, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in; redirect to the dashboard", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Credentials refused", body = FailureBodySchema),
        (status = 500, description = "Identity provider fault", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm { username, password } = form.into_inner();
    match state.login.sign_in(&username, &password).await? {
        AuthOutcome::Authenticated(user_id) => {
            session.persist_user(&user_id)?;
            Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, DASHBOARD_HOME))
                .finish())
        }
        AuthOutcome::Denied(reason) => Ok(HttpResponse::Unauthorized().json(FailureBody {
            error: reason.user_message(),
        })),
    }
}
