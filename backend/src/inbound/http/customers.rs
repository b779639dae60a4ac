//! Customer creation handler.
//!
//! ```text
//! POST /dashboard/customers   multipart: name, email, userImage
//! ```
//!
//! The attachment is buffered only up to [`MAX_ASSET_BYTES`]; the rest of
//! the part is counted and dropped so an oversized upload is reported as too
//! large without holding it in memory.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, post, web};
use futures_util::StreamExt;
use tracing::debug;

use crate::domain::{Error, MAX_ASSET_BYTES, RawAttachment, RawCustomerForm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::mutation_response::into_response;
use crate::inbound::http::schemas::{CustomerFormSchema, ErrorSchema, FailureBodySchema};
use crate::inbound::http::session::SignedInUser;
use crate::inbound::http::state::HttpState;

const MAX_TEXT_FIELD_BYTES: usize = 1024;

fn map_multipart_error(err: MultipartError) -> Error {
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

async fn read_text(field: &mut Field, name: &str) -> Result<String, Error> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(map_multipart_error)?;
        if buf.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
            return Err(Error::invalid_request(format!("{name} is too long")));
        }
        buf.extend_from_slice(&chunk);
    }
    String::from_utf8(buf).map_err(|_| Error::invalid_request(format!("{name} must be UTF-8")))
}

async fn read_attachment(field: &mut Field) -> Result<RawAttachment, Error> {
    let content_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_owned());
    let mut bytes = Vec::new();
    let mut declared_size = 0_usize;
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(map_multipart_error)?;
        declared_size = declared_size.saturating_add(chunk.len());
        let room = MAX_ASSET_BYTES.saturating_sub(bytes.len());
        bytes.extend(chunk.iter().take(room));
    }
    Ok(RawAttachment {
        bytes,
        declared_size,
        content_type,
    })
}

async fn drain(field: &mut Field) -> Result<(), Error> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(map_multipart_error)?;
    }
    Ok(())
}

/// Collect the three customer parts, ignoring any others.
async fn read_form(mut payload: Multipart) -> Result<RawCustomerForm, Error> {
    let mut form = RawCustomerForm::default();
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(map_multipart_error)?;
        let part = field
            .content_disposition()
            .and_then(ContentDisposition::get_name)
            .map(str::to_owned);
        match part.as_deref() {
            Some("name") => form.name = Some(read_text(&mut field, "name").await?),
            Some("email") => form.email = Some(read_text(&mut field, "email").await?),
            Some("userImage") => form.user_image = Some(read_attachment(&mut field).await?),
            other => {
                debug!(part = ?other, "ignoring unexpected multipart part");
                drain(&mut field).await?;
            }
        }
    }
    Ok(form)
}

/// Create a customer with an avatar.
///
/// Success answers `200 {}`; the customers listing has already been marked
/// stale.
#[utoipa::path(
    post,
    path = "/dashboard/customers",
    request_body(content = CustomerFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Customer created"),
        (status = 400, description = "Invalid field or attachment", body = FailureBodySchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 409, description = "Name or email already taken", body = FailureBodySchema),
        (status = 500, description = "Storage failure", body = FailureBodySchema),
        (status = 502, description = "Object store failure", body = FailureBodySchema)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("/dashboard/customers")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    _user: SignedInUser,
    payload: Multipart,
) -> ApiResult<HttpResponse> {
    let form = read_form(payload).await?;
    Ok(into_response(state.customers.execute(form).await))
}

#[cfg(test)]
#[path = "customers_tests.rs"]
mod tests;
