//! Metrics store port - interface to InfluxDB.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::errors::DomainResult;

/// Retention duration of databases created for a test.
pub const TEST_RETENTION_DURATION: &str = "1h";

/// Replication factor of databases created for a test.
pub const TEST_REPLICATION: u32 = 1;

/// Operations the test lifecycle needs from the metrics store.
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Create `db` with a default retention policy named `rp`.
    async fn create_database(&self, db: &str, rp: &str) -> DomainResult<()>;

    async fn drop_database(&self, db: &str) -> DomainResult<()>;

    /// Write line protocol points, one request per line. The first non-2xx
    /// answer aborts the remaining lines.
    async fn ingest(&self, lines: &[String], db: &str, rp: &str) -> DomainResult<()>;

    /// Run an InfluxQL query against `db`.
    async fn query(&self, db: &str, query: &str) -> DomainResult<Map<String, Value>>;
}
