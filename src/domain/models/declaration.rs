//! Test declarations as read from the YAML definition files.

use serde::{Deserialize, Serialize};

use super::result::AlertCounts;
use super::task::{DbRp, TaskType};

/// Kind of unit test, resolved from a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Alert test over a stream script.
    Stream,
    /// Alert test over a batch script.
    Batch,
    /// Downstream-output test asserting on data written to InfluxDB.
    #[serde(rename = "influxdbout")]
    InfluxDbOut,
}

impl TestKind {
    /// Parse the textual kind used in declaration files.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "stream" => Some(Self::Stream),
            "batch" => Some(Self::Batch),
            "influxdbout" => Some(Self::InfluxDbOut),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Batch => "batch",
            Self::InfluxDbOut => "influxdbout",
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single test as declared in a `Tests:` list.
///
/// Read once and never mutated; the factory derives a [`Task`](super::Task)
/// and a concrete test from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestDeclaration {
    /// Human readable test name
    pub name: String,

    /// Task id in Kapacitor, also the script file name in the scripts directory
    pub task_name: String,

    /// Script type (`stream` | `batch`); legacy alias of `test_type`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,

    /// Test kind (`stream` | `batch` | `influxdbout`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,

    pub db: String,
    pub rp: String,
    pub seed_db: String,
    pub seed_rp: String,
    pub assert_db: String,
    pub assert_rp: String,

    /// Line protocol data for alert tests
    pub data: Vec<String>,
    pub seed_data: Vec<String>,
    pub assert_data: Vec<String>,

    /// Kapacitor recording to replay instead of inline data
    pub recording_id: String,

    /// Expected alert counts
    pub expects: AlertCounts,
}

impl TestDeclaration {
    /// The effective test kind name: `test_type` wins, `type` is the fallback.
    pub fn kind_name(&self) -> &str {
        self.test_type
            .as_deref()
            .filter(|kind| !kind.is_empty())
            .or(self.script_type.as_deref())
            .unwrap_or_default()
    }

    /// Resolved test kind, if supported.
    pub fn kind(&self) -> Option<TestKind> {
        TestKind::parse(self.kind_name())
    }

    /// Binding the task reads its input from.
    ///
    /// `seed_db` is the modern field; alert tests declare `db`/`rp` instead.
    pub fn seed_binding(&self) -> Option<DbRp> {
        if !self.seed_db.is_empty() {
            Some(DbRp::new(&self.seed_db, &self.seed_rp))
        } else if !self.db.is_empty() {
            Some(DbRp::new(&self.db, &self.rp))
        } else {
            None
        }
    }

    /// Binding the task writes its output to.
    pub fn assert_binding(&self) -> Option<DbRp> {
        (!self.assert_db.is_empty()).then(|| DbRp::new(&self.assert_db, &self.assert_rp))
    }

    /// Type of the script under test.
    ///
    /// Alert tests take it from their kind. Output tests declare the kind in
    /// `test_type` and the script type in `type`.
    pub fn task_type(&self) -> Option<TaskType> {
        match self.kind()? {
            TestKind::Stream => Some(TaskType::Stream),
            TestKind::Batch => Some(TaskType::Batch),
            TestKind::InfluxDbOut => self.script_type.as_deref().and_then(TaskType::parse),
        }
    }
}

/// Top-level shape of a declaration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestSuite {
    #[serde(rename = "Tests", default)]
    pub tests: Vec<TestDeclaration>,
}
