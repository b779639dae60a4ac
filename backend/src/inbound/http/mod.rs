//! HTTP inbound adapter exposing the dashboard form endpoints.

pub mod customers;
pub mod error;
pub mod health;
pub mod invoices;
pub mod login;
pub mod mutation_response;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
