//! Port abstraction for customer writes and the uniqueness lookup.

use async_trait::async_trait;

use crate::domain::{CustomerField, CustomerName, CustomerRecord, EmailAddress};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer storage.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "customer repository query failed: {message}",
        /// A unique index rejected the insert.
        Duplicate { field: CustomerField } => "a customer with this {field} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Return the fields of `name` and `email` that already belong to a
    /// stored customer, compared case-insensitively.
    ///
    /// The result is empty when neither collides and lists each field at
    /// most once, name before email.
    async fn find_conflicts(
        &self,
        name: &CustomerName,
        email: &EmailAddress,
    ) -> Result<Vec<CustomerField>, CustomerRepositoryError>;

    /// Insert a new customer.
    async fn insert(&self, record: &CustomerRecord) -> Result<(), CustomerRepositoryError>;
}
