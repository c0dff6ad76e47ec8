//! Sequential execution of a test collection.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use super::unit_test::{TestCollection, UnitTest};
use crate::domain::ports::{MetricsStore, TaskEngine};

/// Outcome of one test, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
    pub errored: bool,
    pub summary: String,
}

/// Outcomes of a run, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub outcomes: Vec<TestOutcome>,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed && !o.errored).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed && !o.errored).count()
    }

    pub fn errored(&self) -> usize {
        self.outcomes.iter().filter(|o| o.errored).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0 && self.errored() == 0
    }
}

/// Runs tests one at a time against a single Kapacitor and InfluxDB.
pub struct TestRunner {
    engine: Arc<dyn TaskEngine>,
    store: Arc<dyn MetricsStore>,
}

impl TestRunner {
    pub fn new(engine: Arc<dyn TaskEngine>, store: Arc<dyn MetricsStore>) -> Self {
        Self { engine, store }
    }

    /// Run one test; failures are recorded in the outcome, never returned.
    pub async fn run_one(&self, test: &mut dyn UnitTest) -> TestOutcome {
        let errored = match test.run(self.engine.as_ref(), self.store.as_ref()).await {
            Ok(()) => false,
            Err(err) if err.is_config() => {
                error!(test = %test.name(), error = %err, "Error validating test");
                true
            }
            Err(err) => {
                error!(test = %test.name(), error = %err, "Error running test");
                true
            }
        };

        TestOutcome {
            name: test.name().to_string(),
            passed: !errored && test.passed(),
            errored,
            summary: test.to_string(),
        }
    }

    /// Run every test in collection order. No two tests overlap.
    pub async fn run_all(&self, tests: &mut TestCollection) -> RunSummary {
        let mut summary = RunSummary::default();
        for test in tests.iter_mut() {
            let outcome = self.run_one(test.as_mut()).await;
            info!(test = %outcome.name, passed = outcome.passed, "test finished");
            summary.outcomes.push(outcome);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{mock_services, Call, Operation};
    use crate::services::test_factory::parse_tests;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    const SUITE: &str = r"
Tests:
  - name: passes
    task_name: alert.tick
    db: telegraf
    type: stream
    data:
      - cpu usage_idle=5
    expects:
      warn: 1
  - name: conflicting seed modes
    task_name: alert.tick
    db: telegraf
    type: stream
    recording_id: rec-1
    data:
      - cpu usage_idle=5
  - name: fails
    task_name: alert.tick
    db: telegraf
    test_type: stream
    expects:
      crit: 3
";

    fn scripts() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alert.tick"), "stream|from()").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_run_all_in_order() {
        let dir = scripts();
        let mut tests = parse_tests(SUITE, dir.path()).unwrap();
        let (kapacitor, influxdb, journal) = mock_services();
        let kapacitor = kapacitor.with_status(json!({"stats": {"node-stats": {
            "alert2": {"crits_triggered": 0, "warns_triggered": 1, "oks_triggered": 0}
        }}}));
        let runner = TestRunner::new(Arc::new(kapacitor), Arc::new(influxdb));

        let summary = runner.run_all(&mut tests).await;

        let names: Vec<_> = summary.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["passes", "conflicting seed modes", "fails"]);
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.errored(), 1);
        assert_eq!(summary.failed(), 1);
        assert!(!summary.all_passed());
        assert!(summary.outcomes[1].summary.contains("ERROR: Configuration file cannot define"));

        // The invalid test never reaches Kapacitor.
        let deletes = journal
            .lock()
            .await
            .iter()
            .filter(|c| matches!(c, Call::DeleteTask(_)))
            .count();
        assert_eq!(deletes, 2);
    }

    #[tokio::test]
    async fn test_transport_failure_continues_with_next_test() {
        let dir = scripts();
        let mut tests = parse_tests(SUITE, dir.path()).unwrap();
        tests.remove(1);
        let (kapacitor, influxdb, _) = mock_services();
        let kapacitor = kapacitor.failing_on(Operation::EngineIngest);
        let runner = TestRunner::new(Arc::new(kapacitor), Arc::new(influxdb));

        let summary = runner.run_all(&mut tests).await;
        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.errored(), 2);
    }
}
