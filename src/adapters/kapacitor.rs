//! Kapacitor HTTP client.
//!
//! Wraps the `/kapacitor/v1` task and write endpoints used by the test
//! lifecycle. No retries: a failed call fails the test.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::http::{ensure_success, normalize_host};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::TaskPayload;
use crate::domain::ports::TaskEngine;

const TASKS_PATH: &str = "/kapacitor/v1/tasks";
const WRITE_PATH: &str = "/kapacitor/v1/write";

/// HTTP client for a Kapacitor server.
#[derive(Debug, Clone)]
pub struct KapacitorClient {
    http: Client,
    host: String,
}

impl KapacitorClient {
    pub fn new(host: impl Into<String>, http: Client) -> Self {
        Self {
            http,
            host: normalize_host(host),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}{TASKS_PATH}/{id}", self.host)
    }
}

#[async_trait]
impl TaskEngine for KapacitorClient {
    async fn load_task(&self, payload: &TaskPayload) -> DomainResult<()> {
        info!(task = %payload.id, "Kapacitor loading task");
        let resp = self
            .http
            .post(format!("{}{TASKS_PATH}", self.host))
            .json(payload)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Kapacitor load_task request failed: {e}")))?;
        ensure_success(resp, "Kapacitor load_task").await?;
        Ok(())
    }

    async fn delete_task(&self, name: &str) -> DomainResult<()> {
        let resp = self
            .http
            .delete(self.task_url(name))
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Kapacitor delete_task request failed: {e}")))?;
        ensure_success(resp, "Kapacitor delete_task").await?;
        info!(task = %name, "Kapacitor deleted task");
        Ok(())
    }

    async fn get_status(&self, name: &str) -> DomainResult<Value> {
        debug!(task = %name, "Kapacitor fetching status");
        let resp = self
            .http
            .get(self.task_url(name))
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Kapacitor get_status request failed: {e}")))?;
        let resp = ensure_success(resp, "Kapacitor get_status").await?;
        resp.json::<Value>()
            .await
            .map_err(|e| DomainError::Serialization(format!("Kapacitor get_status parse failed: {e}")))
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
                .map_err(|e| DomainError::Transport(format!("Kapacitor write request failed: {e}")))?;
            ensure_success(resp, "Kapacitor write").await?;
            debug!(db, rp, line = %line, "Kapacitor added data");
        }
        Ok(())
    }
}
