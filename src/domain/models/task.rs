//! Kapacitor task model: the compiled script and the bindings it runs with.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Retention policy used when a declaration leaves it empty.
pub const DEFAULT_RETENTION_POLICY: &str = "autogen";

/// Kapacitor task type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Stream,
    Batch,
}

impl TaskType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "stream" => Some(Self::Stream),
            "batch" => Some(Self::Batch),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Batch => "batch",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A database / retention policy pair a task may read from or write to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DbRp {
    pub db: String,
    pub rp: String,
}

impl DbRp {
    /// Build a binding, falling back to [`DEFAULT_RETENTION_POLICY`] for an
    /// empty retention policy.
    pub fn new(db: impl Into<String>, rp: impl Into<String>) -> Self {
        let rp = rp.into();
        Self {
            db: db.into(),
            rp: if rp.is_empty() {
                DEFAULT_RETENTION_POLICY.to_string()
            } else {
                rp
            },
        }
    }
}

impl std::fmt::Display for DbRp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\".\"{}\"", self.db, self.rp)
    }
}

/// A TICKscript ready to be loaded into Kapacitor.
///
/// Bindings are ordered: the seed binding first, the assertion binding second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    /// Directory the script was read from
    pub path: PathBuf,
    pub script: String,
    pub task_type: TaskType,
    pub dbrps: Vec<DbRp>,
}

/// Body of `POST /kapacitor/v1/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub script: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbrps: Option<Vec<DbRp>>,
}
