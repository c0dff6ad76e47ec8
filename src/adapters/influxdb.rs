//! InfluxDB 1.x HTTP client.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::http::{ensure_success, normalize_host};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DEFAULT_RETENTION_POLICY;
use crate::domain::ports::{MetricsStore, TEST_REPLICATION, TEST_RETENTION_DURATION};

const QUERY_PATH: &str = "/query";
const WRITE_PATH: &str = "/write";

/// HTTP client for an InfluxDB server.
#[derive(Debug, Clone)]
pub struct InfluxdbClient {
    http: Client,
    host: String,
}

impl InfluxdbClient {
    pub fn new(host: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            host: normalize_host(host),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// POST an InfluxQL management statement.
    async fn execute(&self, statement: String, operation: &str) -> DomainResult<()> {
        let resp = self
            .http
            .post(format!("{}{QUERY_PATH}", self.host))
            .form(&[("q", statement.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("{operation} request failed: {e}")))?;
        ensure_success(resp, operation).await?;
        Ok(())
    }
}

/// `CREATE DATABASE` statement for a test database.
pub fn create_database_statement(db: &str, rp: &str) -> String {
    let rp = if rp.is_empty() { DEFAULT_RETENTION_POLICY } else { rp };
    format!(
        "CREATE DATABASE \"{db}\" WITH DURATION {TEST_RETENTION_DURATION} REPLICATION {TEST_REPLICATION} NAME \"{rp}\""
    )
}

#[async_trait]
impl MetricsStore for InfluxdbClient {
    async fn create_database(&self, db: &str, rp: &str) -> DomainResult<()> {
        info!(db, rp, "InfluxDB setup");
        self.execute(create_database_statement(db, rp), "InfluxDB create_database")
            .await
    }

    async fn drop_database(&self, db: &str) -> DomainResult<()> {
        self.execute(format!("DROP DATABASE \"{db}\""), "InfluxDB drop_database")
            .await?;
        info!(db, "InfluxDB cleanup database");
        Ok(())
    }

    async fn ingest(&self, lines: &[String], db: &str, rp: &str) -> DomainResult<()> {
        let url = format!("{}{WRITE_PATH}", self.host);
        for line in lines {
            let resp = self
                .http
                .post(&url)
                .query(&[("db", db), ("rp", rp)])
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(line.clone())
                .send()
                .await
                .map_err(|e| DomainError::Transport(format!("InfluxDB write request failed: {e}")))?;
            ensure_success(resp, "InfluxDB write").await?;
            debug!(db, rp, line = %line, "InfluxDB added data");
        }
        Ok(())
    }

    async fn query(&self, db: &str, query: &str) -> DomainResult<Map<String, Value>> {
        let resp = self
            .http
            .get(format!("{}{QUERY_PATH}", self.host))
            .query(&[("db", db), ("q", query)])
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("InfluxDB query request failed: {e}")))?;
        let resp = ensure_success(resp, "InfluxDB query").await?;
        resp.json::<Map<String, Value>>()
            .await
            .map_err(|e| DomainError::Serialization(format!("InfluxDB query parse failed: {e}")))
    }
}
