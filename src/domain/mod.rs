//! Domain layer for kapacitor-unit
//!
//! This module contains the test data model and the ports to Kapacitor and InfluxDB.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{DomainError, DomainResult};
