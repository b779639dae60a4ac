//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Customers that invoices are billed to.
    ///
    /// `name` and `email` carry unique indexes on their lower-cased values.
    customers (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Durable URL returned by the object store.
        image_url -> Varchar,
    }
}

diesel::table! {
    /// Invoices issued to customers.
    invoices (id) {
        id -> Uuid,
        customer_id -> Uuid,
        /// Amount in integer cents, never negative.
        amount -> Int4,
        /// `pending` or `paid`.
        status -> Varchar,
        /// Issue date, stamped on creation.
        date -> Date,
    }
}

diesel::joinable!(invoices -> customers (customer_id));
diesel::allow_tables_to_appear_in_same_query!(customers, invoices);
