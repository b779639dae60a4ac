//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **assets**: HTTP object storage client
//! - **cache**: in-process and Redis cache invalidation
//! - **memory**: in-memory repositories for development and tests
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod assets;
pub mod cache;
pub mod memory;
pub mod persistence;
