//! Domain primitives, pipeline stages and services.
//!
//! Purpose: define the strongly typed records the dashboard mutates and the
//! mutation pipeline that writes them. Nothing here knows about HTTP,
//! Diesel, Redis or the object store; those live behind [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - InvoiceRecord, CustomerRecord and their value types.
//! - Validator functions (`validate_invoice`, `validate_customer`).
//! - MutationError / PipelineResult / MutationPipeline: the pipeline contract.
//! - InvoiceMutationService, CustomerMutationService, LoginFlow: use-cases.

pub mod asset;
pub mod auth;
pub mod customer;
pub mod customer_mutations;
pub mod error;
pub mod invoice;
pub mod invoice_mutations;
pub mod login;
pub mod pipeline;
pub mod ports;
pub mod reporter;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::asset::{
    AssetMimeType, AssetPayload, AssetUrl, AssetValidationError, MAX_ASSET_BYTES, UploadedAsset,
};
pub use self::auth::{AuthFailureReason, AuthOutcome, LoginCredentials, LoginValidationError};
pub use self::customer::{
    CustomerDraft, CustomerField, CustomerId, CustomerName, CustomerRecord,
    CustomerValidationError, EmailAddress,
};
pub use self::customer_mutations::{CreationStage, CustomerMutationService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::invoice::{
    AmountCents, AmountError, InvoiceDraft, InvoiceId, InvoiceRecord, InvoiceStatus,
    InvoiceStatusParseError,
};
pub use self::invoice_mutations::{InvoiceMutation, InvoiceMutationService};
pub use self::login::LoginFlow;
pub use self::pipeline::{
    CachePath, CachePathError, FailureKind, MutationError, MutationKind, MutationPipeline,
    NavigationTarget, PipelineResult,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};
pub use self::validation::{
    FormField, RawAttachment, RawCustomerForm, RawInvoiceForm, ValidatedCustomer,
    ValidationError, validate_customer, validate_invoice,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use dashboard_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
