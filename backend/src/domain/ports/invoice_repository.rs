//! Port abstraction for invoice writes.
//!
//! The mutation executor is the only caller. Each method is one storage
//! statement; update and delete report whether a row matched so the service
//! can distinguish "not found" from success.

use async_trait::async_trait;

use crate::domain::{InvoiceDraft, InvoiceId, InvoiceRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised when writing invoices.
    pub enum InvoiceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "invoice repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "invoice repository query failed: {message}",
        /// The referenced customer does not exist.
        UnknownCustomer { message: String } => "invoice references an unknown customer: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice.
    async fn insert(&self, record: &InvoiceRecord) -> Result<(), InvoiceRepositoryError>;

    /// Overwrite customer, amount and status of an existing invoice.
    ///
    /// Returns `false` when no invoice has the given id.
    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<bool, InvoiceRepositoryError>;

    /// Delete an invoice. Returns `false` when no invoice has the given id.
    async fn delete(&self, id: &InvoiceId) -> Result<bool, InvoiceRepositoryError>;
}
