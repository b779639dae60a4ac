//! PostgreSQL-backed `InvoiceRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InvoiceRepository, InvoiceRepositoryError};
use crate::domain::{AmountCents, InvoiceDraft, InvoiceId, InvoiceRecord};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{InvoiceUpdate, NewInvoiceRow};
use super::pool::{DbPool, PoolError};
use super::schema::invoices;

/// Diesel-backed implementation of the `InvoiceRepository` port.
#[derive(Clone)]
pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InvoiceRepositoryError {
    InvoiceRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> InvoiceRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => InvoiceRepositoryError::connection(message),
        DieselFailure::ForeignKeyViolation(message) => {
            InvoiceRepositoryError::unknown_customer(message)
        }
        DieselFailure::UniqueViolation(_) => InvoiceRepositoryError::query("duplicate invoice id"),
        DieselFailure::Query(message) => InvoiceRepositoryError::query(message),
    }
}

fn amount_column(amount: AmountCents) -> Result<i32, InvoiceRepositoryError> {
    i32::try_from(amount.get())
        .map_err(|_| InvoiceRepositoryError::query("amount exceeds column range"))
}

#[async_trait]
impl InvoiceRepository for DieselInvoiceRepository {
    async fn insert(&self, record: &InvoiceRecord) -> Result<(), InvoiceRepositoryError> {
        let row = NewInvoiceRow {
            id: *record.id.as_uuid(),
            customer_id: *record.customer_id.as_uuid(),
            amount: amount_column(record.amount)?,
            status: record.status.as_str(),
            date: record.date,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(invoices::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<bool, InvoiceRepositoryError> {
        let changes = InvoiceUpdate {
            customer_id: *draft.customer_id.as_uuid(),
            amount: amount_column(draft.amount)?,
            status: draft.status.as_str(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(invoices::table.find(*id.as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &InvoiceId) -> Result<bool, InvoiceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(invoices::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
