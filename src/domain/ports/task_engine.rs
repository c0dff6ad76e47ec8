//! Task engine port - interface to Kapacitor.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainResult;
use crate::domain::models::TaskPayload;

/// Operations the test lifecycle needs from the task engine.
///
/// Any non-2xx answer is reported as [`DomainError::Transport`](crate::domain::errors::DomainError::Transport).
#[async_trait]
pub trait TaskEngine: Send + Sync {
    /// Define and enable a task.
    async fn load_task(&self, payload: &TaskPayload) -> DomainResult<()>;

    /// Delete a task by id.
    async fn delete_task(&self, name: &str) -> DomainResult<()>;

    /// Fetch the task document, including its `stats.node-stats` tree.
    async fn get_status(&self, name: &str) -> DomainResult<Value>;

    /// Write line protocol points straight into the stream.
    ///
    /// Lines are written one request at a time; the first failure aborts.
    async fn ingest(&self, lines: &[String], db: &str, rp: &str) -> DomainResult<()>;
}
