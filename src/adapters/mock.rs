//! In-memory Kapacitor and InfluxDB doubles for testing.
//!
//! Both mocks append to a shared [`Journal`] so tests can assert on the
//! order of calls across services.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::TaskPayload;
use crate::domain::ports::{MetricsStore, TaskEngine};

/// A recorded collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LoadTask(TaskPayload),
    DeleteTask(String),
    GetStatus(String),
    EngineIngest { lines: Vec<String>, db: String, rp: String },
    CreateDatabase { db: String, rp: String },
    DropDatabase(String),
    StoreIngest { lines: Vec<String>, db: String, rp: String },
    Query { db: String, query: String },
}

/// Operations whose behaviour can be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LoadTask,
    DeleteTask,
    GetStatus,
    EngineIngest,
    CreateDatabase,
    DropDatabase,
    StoreIngest,
    Query,
}

/// Shared, ordered record of calls.
pub type Journal = Arc<Mutex<Vec<Call>>>;

#[derive(Debug, Default)]
struct Faults {
    failing: HashSet<Operation>,
    panicking: HashSet<Operation>,
}

impl Faults {
    fn check(&self, op: Operation) -> DomainResult<()> {
        if self.panicking.contains(&op) {
            panic!("mock {op:?} panicked");
        }
        if self.failing.contains(&op) {
            return Err(DomainError::Transport(format!("mock {op:?} failed: 500")));
        }
        Ok(())
    }
}

/// Mock task engine.
#[derive(Debug)]
pub struct MockKapacitor {
    journal: Journal,
    status: Value,
    faults: Faults,
}

impl MockKapacitor {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            status: json!({"stats": {"node-stats": {
                "alert2": {"crits_triggered": 0, "warns_triggered": 0, "oks_triggered": 0}
            }}}),
            faults: Faults::default(),
        }
    }

    /// Status document returned by `get_status`.
    #[must_use]
    pub fn with_status(mut self, status: Value) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn failing_on(mut self, op: Operation) -> Self {
        self.faults.failing.insert(op);
        self
    }

    #[must_use]
    pub fn panicking_on(mut self, op: Operation) -> Self {
        self.faults.panicking.insert(op);
        self
    }

    async fn record(&self, call: Call) {
        self.journal.lock().await.push(call);
    }
}

#[async_trait]
impl TaskEngine for MockKapacitor {
    async fn load_task(&self, payload: &TaskPayload) -> DomainResult<()> {
        self.record(Call::LoadTask(payload.clone())).await;
        self.faults.check(Operation::LoadTask)
    }

    async fn delete_task(&self, name: &str) -> DomainResult<()> {
        self.record(Call::DeleteTask(name.to_string())).await;
        self.faults.check(Operation::DeleteTask)
    }

    async fn get_status(&self, name: &str) -> DomainResult<Value> {
        self.record(Call::GetStatus(name.to_string())).await;
        self.faults.check(Operation::GetStatus)?;
        Ok(self.status.clone())
    }

    async fn ingest(&self, lines: &[String], db: &str, rp: &str) -> DomainResult<()> {
        self.record(Call::EngineIngest {
            lines: lines.to_vec(),
            db: db.to_string(),
            rp: rp.to_string(),
        })
        .await;
        self.faults.check(Operation::EngineIngest)
    }
}

/// Mock metrics store.
#[derive(Debug)]
pub struct MockInfluxdb {
    journal: Journal,
    query_response: Map<String, Value>,
    faults: Faults,
}

impl MockInfluxdb {
    pub fn new(journal: Journal) -> Self {
        let mut query_response = Map::new();
        query_response.insert("results".to_string(), json!([{"statement_id": 0}]));
        Self {
            journal,
            query_response,
            faults: Faults::default(),
        }
    }

    #[must_use]
    pub fn with_query_response(mut self, response: Map<String, Value>) -> Self {
        self.query_response = response;
        self
    }

    #[must_use]
    pub fn failing_on(mut self, op: Operation) -> Self {
        self.faults.failing.insert(op);
        self
    }

    async fn record(&self, call: Call) {
        self.journal.lock().await.push(call);
    }
}

#[async_trait]
impl MetricsStore for MockInfluxdb {
    async fn create_database(&self, db: &str, rp: &str) -> DomainResult<()> {
        self.record(Call::CreateDatabase {
            db: db.to_string(),
            rp: rp.to_string(),
        })
        .await;
        self.faults.check(Operation::CreateDatabase)
    }

    async fn drop_database(&self, db: &str) -> DomainResult<()> {
        self.record(Call::DropDatabase(db.to_string())).await;
        self.faults.check(Operation::DropDatabase)
    }

    async fn ingest(&self, lines: &[String], db: &str, rp: &str) -> DomainResult<()> {
        self.record(Call::StoreIngest {
            lines: lines.to_vec(),
            db: db.to_string(),
            rp: rp.to_string(),
        })
        .await;
        self.faults.check(Operation::StoreIngest)
    }

    async fn query(&self, db: &str, query: &str) -> DomainResult<Map<String, Value>> {
        self.record(Call::Query {
            db: db.to_string(),
            query: query.to_string(),
        })
        .await;
        self.faults.check(Operation::Query)?;
        Ok(self.query_response.clone())
    }
}

/// A fresh journal with a Kapacitor and an InfluxDB mock writing to it.
pub fn mock_services() -> (MockKapacitor, MockInfluxdb, Journal) {
    let journal = Journal::default();
    (
        MockKapacitor::new(journal.clone()),
        MockInfluxdb::new(journal.clone()),
        journal,
    )
}
