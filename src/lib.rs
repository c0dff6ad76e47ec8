//! kapacitor-unit - unit tests for Kapacitor TICKscripts
//!
//! A test declares a TICKscript, the line protocol data to feed it and the
//! outcome to expect. Each test loads its task into Kapacitor, seeds data
//! through Kapacitor or InfluxDB, waits for the task to process it, checks
//! the outcome and removes everything it created.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): test model, errors and the service ports
//! - **Service Layer** (`services`): task compilation, test lifecycles, factory and runner
//! - **Adapters** (`adapters`): Kapacitor and InfluxDB HTTP clients, test doubles
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use kapacitor_unit::services::{load_tests_from_file_system, TestRunner};
//!
//! let mut tests = load_tests_from_file_system("tests.yaml".as_ref(), "tick".as_ref())?;
//! let summary = TestRunner::new(kapacitor, influxdb).run_all(&mut tests).await;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AlertCounts, Config, DbRp, Task, TaskType, TestDeclaration, TestKind, TestResult,
};
pub use domain::ports::{MetricsStore, TaskEngine};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{TestCollection, TestRunner, UnitTest};
