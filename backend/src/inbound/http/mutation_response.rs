//! Render a [`PipelineResult`] as an HTTP response.
//!
//! Navigation becomes `303 See Other` so browsers follow it with a `GET`.
//! Success without navigation is `200 {}`. Failures carry `{"error": msg}`
//! with a status chosen by failure kind. Form bodies that cannot be decoded
//! at all use the same `{"error": msg}` shape through [`form_config`].

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::debug;

use crate::domain::{FailureKind, PipelineResult};

/// Client-visible failure body.
#[derive(Debug, Serialize)]
pub struct FailureBody<'a> {
    pub error: &'a str,
}

pub(crate) fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::Validation => StatusCode::BAD_REQUEST,
        FailureKind::Conflict => StatusCode::CONFLICT,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::Upload => StatusCode::BAD_GATEWAY,
        FailureKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the response for `result`.
pub fn into_response(result: PipelineResult) -> HttpResponse {
    match result {
        PipelineResult::Success {
            navigation: Some(target),
        } => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, target.location().to_owned()))
            .finish(),
        PipelineResult::Success { navigation: None } => {
            HttpResponse::Ok().json(serde_json::json!({}))
        }
        PipelineResult::Failure { message, kind } => {
            HttpResponse::build(status_for(kind)).json(FailureBody { error: &message })
        }
    }
}

/// Shown when a urlencoded body cannot be decoded into form fields.
pub const UNREADABLE_FORM: &str = "The form could not be read";

fn form_error(error: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = %req.path(), %error, "form body rejected");
    let status = match &error {
        UrlencodedError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        UrlencodedError::Overflow { .. } | UrlencodedError::UnknownLength => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let response = HttpResponse::build(status).json(FailureBody {
        error: UNREADABLE_FORM,
    });
    InternalError::from_response(error, response).into()
}

/// Extractor configuration for urlencoded forms.
///
/// Decoding failures answer `{"error": msg}` without the parser's text.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(form_error)
}
