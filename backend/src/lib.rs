//! Dashboard records backend.
//!
//! Form endpoints for invoices and customers run through one mutation
//! pipeline (validate, check uniqueness, upload, persist, invalidate,
//! report) behind hexagonal ports, so the same services run against
//! PostgreSQL, Redis and an object store in production and in-memory
//! doubles in tests.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
