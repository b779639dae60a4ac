//! Shared vocabulary of the mutation pipeline.
//!
//! Every dashboard mutation runs the same ordered stages and ends in a
//! [`PipelineResult`]. Stages return `Result<_, MutationError>` so the first
//! failure short-circuits the rest with `?`.

use std::borrow::Cow;
use std::fmt;

use async_trait::async_trait;

use super::{CustomerField, ValidationError};

/// Logical read path whose cached renderings go stale after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CachePath(Cow<'static, str>);

/// Raised when a cache path is not an absolute path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cache path must start with '/' and contain no whitespace")]
pub struct CachePathError;

impl CachePath {
    /// Invoice listing.
    pub const INVOICES: Self = Self(Cow::Borrowed("/dashboard/invoices"));
    /// Customer listing.
    pub const CUSTOMERS: Self = Self(Cow::Borrowed("/dashboard/customers"));

    /// Validate an arbitrary path.
    pub fn new(raw: impl Into<String>) -> Result<Self, CachePathError> {
        let raw = raw.into();
        if !raw.starts_with('/') || raw.chars().any(char::is_whitespace) {
            return Err(CachePathError);
        }
        Ok(Self(Cow::Owned(raw)))
    }

    /// Borrow the path text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CachePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the client should go after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget(CachePath);

impl NavigationTarget {
    /// Navigate to the listing at `path`.
    pub fn to(path: CachePath) -> Self {
        Self(path)
    }

    /// Location the client is sent to.
    pub fn location(&self) -> &str {
        self.0.as_str()
    }
}

/// The four storage mutations the executor performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateInvoice,
    UpdateInvoice,
    DeleteInvoice,
    CreateCustomer,
}

impl MutationKind {
    /// Label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateInvoice => "create_invoice",
            Self::UpdateInvoice => "update_invoice",
            Self::DeleteInvoice => "delete_invoice",
            Self::CreateCustomer => "create_customer",
        }
    }

    /// Generic message shown when storage fails.
    pub const fn persistence_message(self) -> &'static str {
        match self {
            Self::CreateInvoice => "There is a problem creating an invoice",
            Self::UpdateInvoice => "There is a problem updating an invoice",
            Self::DeleteInvoice => "There is a problem deleting an invoice",
            Self::CreateCustomer => "There is a problem creating a customer",
        }
    }

    /// Generic message shown when the attachment upload fails.
    pub const fn upload_message(self) -> &'static str {
        "There is a problem uploading the customer image"
    }

    /// Listing invalidated after this mutation succeeds.
    pub fn affected_path(self) -> CachePath {
        match self {
            Self::CreateCustomer => CachePath::CUSTOMERS,
            _ => CachePath::INVOICES,
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure taxonomy shared by every pipeline stage.
///
/// `Upload` and `Persistence` carry the underlying cause for logging only;
/// the reporter never shows it to the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// Input rejected before any side effect.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A customer with the same name or email already exists.
    #[error("{message}")]
    Conflict {
        fields: Vec<CustomerField>,
        message: String,
    },
    /// The object store did not return a durable URL.
    #[error("asset upload failed: {cause}")]
    Upload { cause: String },
    /// The storage statement failed.
    #[error("{kind} failed in storage: {cause}")]
    Persistence { kind: MutationKind, cause: String },
    /// Update or delete matched no row.
    #[error("{entity} {id} was not found")]
    NotFound { entity: &'static str, id: String },
}

impl MutationError {
    /// Build a conflict naming the colliding fields.
    pub fn conflict(fields: Vec<CustomerField>, message: impl Into<String>) -> Self {
        Self::Conflict {
            fields,
            message: message.into(),
        }
    }

    /// Build an upload failure.
    pub fn upload(cause: impl Into<String>) -> Self {
        Self::Upload {
            cause: cause.into(),
        }
    }

    /// Build a persistence failure for `kind`.
    pub fn persistence(kind: MutationKind, cause: impl Into<String>) -> Self {
        Self::Persistence {
            kind,
            cause: cause.into(),
        }
    }

    /// Build a not-found failure.
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Category reported to the client.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::Conflict { .. } => FailureKind::Conflict,
            Self::Upload { .. } => FailureKind::Upload,
            Self::Persistence { .. } => FailureKind::Persistence,
            Self::NotFound { .. } => FailureKind::NotFound,
        }
    }
}

/// Failure category visible to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Validation,
    Conflict,
    Upload,
    Persistence,
    NotFound,
}

/// Outcome of one pipeline run as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    /// Mutation applied.
    Success {
        navigation: Option<NavigationTarget>,
    },
    /// Mutation refused or failed; `message` is safe to display.
    Failure { message: String, kind: FailureKind },
}

impl PipelineResult {
    /// Whether the mutation was applied.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A mutation request handler.
#[async_trait]
pub trait MutationPipeline: Send + Sync {
    /// Raw request input accepted by the pipeline.
    type Input: Send + 'static;

    /// Run every stage and report the outcome.
    async fn execute(&self, input: Self::Input) -> PipelineResult;
}
