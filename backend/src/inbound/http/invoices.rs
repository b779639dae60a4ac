//! Invoice form handlers.
//!
//! ```text
//! POST /dashboard/invoices               customerId=…&amount=12.50&status=paid
//! POST /dashboard/invoices/{id}          customerId=…&amount=12.50&status=paid
//! POST /dashboard/invoices/{id}/delete
//! ```
//!
//! Every route requires a signed-in session and answers through
//! [`into_response`]: `303` to the listing on success, `{"error": …}` otherwise.

use actix_web::{HttpResponse, post, web};

use crate::domain::{InvoiceMutation, RawInvoiceForm};
use crate::inbound::http::mutation_response::into_response;
use crate::inbound::http::schemas::{ErrorSchema, FailureBodySchema, InvoiceFormSchema};
use crate::inbound::http::session::SignedInUser;
use crate::inbound::http::state::HttpState;

async fn run(state: &HttpState, mutation: InvoiceMutation) -> HttpResponse {
    into_response(state.invoices.execute(mutation).await)
}

/// Create an invoice dated today.
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(content = InvoiceFormSchema, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the invoice listing"),
        (status = 400, description = "Invalid field", body = FailureBodySchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 500, description = "Storage failure", body = FailureBodySchema)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/dashboard/invoices")]
pub async fn create_invoice(
    state: web::Data<HttpState>,
    _user: SignedInUser,
    form: web::Form<RawInvoiceForm>,
) -> HttpResponse {
    run(&state, InvoiceMutation::Create(form.into_inner())).await
}

/// Replace an invoice's customer, amount and status.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}",
    params(("id" = String, Path, description = "Invoice identifier")),
    request_body(content = InvoiceFormSchema, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the invoice listing"),
        (status = 400, description = "Invalid field", body = FailureBodySchema),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 404, description = "Unknown invoice", body = FailureBodySchema),
        (status = 500, description = "Storage failure", body = FailureBodySchema)
    ),
    tags = ["invoices"],
    operation_id = "updateInvoice"
)]
#[post("/dashboard/invoices/{id}")]
pub async fn update_invoice(
    state: web::Data<HttpState>,
    _user: SignedInUser,
    path: web::Path<String>,
    form: web::Form<RawInvoiceForm>,
) -> HttpResponse {
    let mutation = InvoiceMutation::Update {
        id: path.into_inner(),
        form: form.into_inner(),
    };
    run(&state, mutation).await
}

/// Remove an invoice.
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/delete",
    params(("id" = String, Path, description = "Invoice identifier")),
    responses(
        (status = 303, description = "Deleted; redirect to the invoice listing"),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 404, description = "Unknown invoice", body = FailureBodySchema),
        (status = 500, description = "Storage failure", body = FailureBodySchema)
    ),
    tags = ["invoices"],
    operation_id = "deleteInvoice"
)]
#[post("/dashboard/invoices/{id}/delete")]
pub async fn delete_invoice(
    state: web::Data<HttpState>,
    _user: SignedInUser,
    path: web::Path<String>,
) -> HttpResponse {
    run(&state, InvoiceMutation::Delete { id: path.into_inner() }).await
}

#[cfg(test)]
#[path = "invoices_tests.rs"]
mod tests;
