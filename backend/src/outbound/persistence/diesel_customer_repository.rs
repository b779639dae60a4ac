//! PostgreSQL-backed `CustomerRepository` implementation using Diesel ORM.
//!
//! Name and email comparisons use `lower(column) = lower($1)` so they match
//! the expression indexes created by the migrations. No wildcard matching is
//! involved: `%` and `_` in a name are compared literally.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};
use crate::domain::{CustomerField, CustomerName, CustomerRecord, EmailAddress};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::NewCustomerRow;
use super::pool::{DbPool, PoolError};
use super::schema::customers;

diesel::define_sql_function! {
    /// PostgreSQL `lower(text)`.
    fn lower(x: Text) -> Text;
}

const EMAIL_INDEX: &str = "customers_email_lower_key";

/// Diesel-backed implementation of the `CustomerRepository` port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerRepositoryError {
    CustomerRepositoryError::connection(error.into_message())
}

/// Name the colliding field from the violated index.
fn field_for_constraint(constraint: Option<&str>) -> CustomerField {
    match constraint {
        Some(EMAIL_INDEX) => CustomerField::Email,
        _ => CustomerField::Name,
    }
}

fn map_diesel_error(error: diesel::result::Error) -> CustomerRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CustomerRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            CustomerRepositoryError::duplicate(field_for_constraint(constraint.as_deref()))
        }
        DieselFailure::ForeignKeyViolation(message) | DieselFailure::Query(message) => {
            CustomerRepositoryError::query(message)
        }
    }
}

/// Fold per-row match flags into the colliding fields, name first.
fn conflicting_fields(matches: &[(bool, bool)]) -> Vec<CustomerField> {
    let mut fields = Vec::with_capacity(2);
    if matches.iter().any(|(name, _)| *name) {
        fields.push(CustomerField::Name);
    }
    if matches.iter().any(|(_, email)| *email) {
        fields.push(CustomerField::Email);
    }
    fields
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn find_conflicts(
        &self,
        name: &CustomerName,
        email: &EmailAddress,
    ) -> Result<Vec<CustomerField>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let name_matches = lower(customers::name).eq(lower(name.as_str()));
        let email_matches = lower(customers::email).eq(lower(email.as_str()));
        let matches: Vec<(bool, bool)> = customers::table
            .filter(name_matches.or(email_matches))
            .select((name_matches, email_matches))
            .limit(2)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(conflicting_fields(&matches))
    }

    async fn insert(&self, record: &CustomerRecord) -> Result<(), CustomerRepositoryError> {
        let row = NewCustomerRow {
            id: *record.id.as_uuid(),
            name: record.name.as_str(),
            email: record.email.as_str(),
            image_url: record.image_url.as_str(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(customers::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
