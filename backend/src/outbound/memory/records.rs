//! Both repository ports over one shared in-memory store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    CustomerRepository, CustomerRepositoryError, InvoiceRepository, InvoiceRepositoryError,
};
use crate::domain::{
    CustomerField, CustomerId, CustomerName, CustomerRecord, EmailAddress, InvoiceDraft,
    InvoiceId, InvoiceRecord,
};

#[derive(Debug, Default)]
struct Tables {
    customers: HashMap<CustomerId, CustomerRecord>,
    invoices: HashMap<InvoiceId, InvoiceRecord>,
}

impl Tables {
    fn conflicts(&self, name: &str, email: &str) -> Vec<CustomerField> {
        let name = name.to_lowercase();
        let email = email.to_lowercase();
        let mut fields = Vec::with_capacity(2);
        if self
            .customers
            .values()
            .any(|c| c.name.as_str().to_lowercase() == name)
        {
            fields.push(CustomerField::Name);
        }
        if self
            .customers
            .values()
            .any(|c| c.email.as_str().to_lowercase() == email)
        {
            fields.push(CustomerField::Email);
        }
        fields
    }
}

/// Customers and invoices held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRecords {
    tables: Mutex<Tables>,
}

impl InMemoryRecords {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `record` directly, bypassing the uniqueness rules.
    pub fn seed_customer(&self, record: CustomerRecord) {
        self.lock().customers.insert(record.id, record);
    }

    /// Snapshot of stored customers.
    pub fn customers(&self) -> Vec<CustomerRecord> {
        self.lock().customers.values().cloned().collect()
    }

    /// Snapshot of stored invoices.
    pub fn invoices(&self) -> Vec<InvoiceRecord> {
        self.lock().invoices.values().cloned().collect()
    }

    /// Look up one invoice.
    pub fn invoice(&self, id: &InvoiceId) -> Option<InvoiceRecord> {
        self.lock().invoices.get(id).cloned()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryRecords {
    async fn insert(&self, record: &InvoiceRecord) -> Result<(), InvoiceRepositoryError> {
        let mut tables = self.lock();
        if !tables.customers.contains_key(&record.customer_id) {
            return Err(InvoiceRepositoryError::unknown_customer(
                record.customer_id.to_string(),
            ));
        }
        if tables.invoices.contains_key(&record.id) {
            return Err(InvoiceRepositoryError::query("duplicate invoice id"));
        }
        tables.invoices.insert(record.id, record.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<bool, InvoiceRepositoryError> {
        let mut tables = self.lock();
        if !tables.invoices.contains_key(id) {
            return Ok(false);
        }
        if !tables.customers.contains_key(&draft.customer_id) {
            return Err(InvoiceRepositoryError::unknown_customer(
                draft.customer_id.to_string(),
            ));
        }
        let Some(invoice) = tables.invoices.get_mut(id) else {
            return Ok(false);
        };
        invoice.customer_id = draft.customer_id;
        invoice.amount = draft.amount;
        invoice.status = draft.status;
        Ok(true)
    }

    async fn delete(&self, id: &InvoiceId) -> Result<bool, InvoiceRepositoryError> {
        Ok(self.lock().invoices.remove(id).is_some())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryRecords {
    async fn find_conflicts(
        &self,
        name: &CustomerName,
        email: &EmailAddress,
    ) -> Result<Vec<CustomerField>, CustomerRepositoryError> {
        Ok(self.lock().conflicts(name.as_str(), email.as_str()))
    }

    async fn insert(&self, record: &CustomerRecord) -> Result<(), CustomerRepositoryError> {
        let mut tables = self.lock();
        if let Some(field) = tables
            .conflicts(record.name.as_str(), record.email.as_str())
            .first()
        {
            return Err(CustomerRepositoryError::duplicate(*field));
        }
        tables.customers.insert(record.id, record.clone());
        Ok(())
    }
}
