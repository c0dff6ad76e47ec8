//! Ports to the external services a test runs against.

pub mod metrics_store;
pub mod task_engine;

pub use metrics_store::{MetricsStore, TEST_REPLICATION, TEST_RETENTION_DURATION};
pub use task_engine::TaskEngine;
