//! In-memory record storage.
//!
//! Used when no database is configured and by integration tests. Enforces the
//! same rules as the PostgreSQL schema: case-insensitive customer identity and
//! invoices that must reference an existing customer.

mod records;

pub use records::InMemoryRecords;
