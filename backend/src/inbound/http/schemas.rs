//! OpenAPI schema definitions for the dashboard's wire types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers below mirror them for utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "unauthorized")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "login required")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// Body returned when a mutation or sign-in fails.
#[derive(ToSchema)]
#[schema(as = FailureBody)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FailureBodySchema {
    /// Message suitable for display next to the form.
    #[schema(example = "Invalid email")]
    error: String,
}

/// URL-encoded invoice form.
#[derive(ToSchema)]
#[schema(as = InvoiceForm)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InvoiceFormSchema {
    /// Owning customer.
    #[schema(example = "3958dc9e-712f-4377-85e9-fec4b6a6442a")]
    customer_id: String,
    /// Decimal amount in currency units.
    #[schema(example = "157.95")]
    amount: String,
    /// `pending` or `paid`.
    #[schema(example = "pending")]
    status: String,
}

/// Multipart customer form.
#[derive(ToSchema)]
#[schema(as = CustomerForm)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CustomerFormSchema {
    #[schema(example = "Delba de Oliveira")]
    name: String,
    #[schema(example = "delba@oliveira.com")]
    email: String,
    /// PNG, JPEG or WebP avatar under 10 kB.
    #[schema(value_type = String, format = Binary)]
    user_image: Vec<u8>,
}

/// URL-encoded sign-in form.
#[derive(ToSchema)]
#[schema(as = LoginForm)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LoginFormSchema {
    #[schema(example = "admin")]
    username: String,
    #[schema(example = "password")]
    password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "not_found",
            "conflict",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    fn invoice_form_uses_camel_case_names() {
        let schema_json = schema_to_json::<InvoiceFormSchema>();
        assert!(schema_json.contains("customerId"));
        assert!(!schema_json.contains("customer_id"));
    }

    #[rstest]
    fn customer_form_names_the_image_part() {
        let schema_json = schema_to_json::<CustomerFormSchema>();
        assert!(schema_json.contains("userImage"));
    }
}
