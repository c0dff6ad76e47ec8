//! Downstream-output test: runs a task that writes into an assertion
//! database and queries what it wrote.
//!
//! The queried rows are kept for inspection but not compared against
//! `assert_data`; a run passes as long as every call succeeds.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, error, instrument};

use super::task_compiler::load_task;
use super::unit_test::{guarded, settle, LifecycleState, UnitTest};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{DbRp, Task, TaskType, TestDeclaration, TestKind, TestResult};
use crate::domain::ports::{MetricsStore, TaskEngine};

/// Time the task gets to write its output before it is queried.
pub const OUTPUT_GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Query run against the assertion database.
pub const ASSERT_QUERY: &str = "SELECT * FROM \"sum\"";

/// Asserts on data a task writes to InfluxDB through an `influxDBOut` node.
#[derive(Debug)]
pub struct DbOutTest {
    name: String,
    task_name: String,
    seed_data: Vec<String>,
    assert_data: Vec<String>,
    seed: Option<DbRp>,
    assert: Option<DbRp>,
    task: Task,
    result: TestResult,
    observed: Option<Map<String, Value>>,
    state: LifecycleState,
}

impl DbOutTest {
    pub(crate) fn init(declaration: &TestDeclaration, task: Task) -> Self {
        Self {
            name: declaration.name.clone(),
            task_name: declaration.task_name.clone(),
            seed_data: declaration.seed_data.clone(),
            assert_data: declaration.assert_data.clone(),
            seed: declaration.seed_binding(),
            assert: declaration.assert_binding(),
            task,
            result: TestResult::default(),
            observed: None,
            state: LifecycleState::Created,
        }
    }

    /// Response of the assertion query from the last run.
    pub fn observed(&self) -> Option<&Map<String, Value>> {
        self.observed.as_ref()
    }

    /// Expected rows as declared. Not compared yet.
    pub fn assert_data(&self) -> &[String] {
        &self.assert_data
    }

    fn bindings(&self) -> DomainResult<(&DbRp, &DbRp)> {
        match (&self.seed, &self.assert) {
            (Some(seed), Some(assert)) => Ok((seed, assert)),
            _ => Err(DomainError::Config(format!(
                "influxdbout test {:?} must declare both seed_db and assert_db",
                self.name
            ))),
        }
    }

    async fn setup(&mut self, engine: &dyn TaskEngine, store: &dyn MetricsStore) -> DomainResult<()> {
        let (seed, assert) = self.bindings()?;
        store.create_database(&seed.db, &seed.rp).await?;
        store.create_database(&assert.db, &assert.rp).await?;

        let dbrps = vec![seed.clone(), assert.clone()];
        load_task(engine, &self.task, Some(dbrps)).await?;
        self.state = LifecycleState::Setup;
        Ok(())
    }

    async fn add_data(&mut self, engine: &dyn TaskEngine, store: &dyn MetricsStore) -> DomainResult<()> {
        let (seed, _) = self.bindings()?;
        match self.task.task_type {
            TaskType::Stream => engine.ingest(&self.seed_data, &seed.db, &seed.rp).await?,
            TaskType::Batch => store.ingest(&self.seed_data, &seed.db, &seed.rp).await?,
        }
        self.state = LifecycleState::Seeded;
        Ok(())
    }

    async fn results(&mut self, store: &dyn MetricsStore) -> DomainResult<()> {
        let (_, assert) = self.bindings()?;
        let rows = store.query(&assert.db, ASSERT_QUERY).await?;
        debug!(db = %assert.db, rows = ?rows, "assertion query");

        self.observed = Some(rows);
        self.result = TestResult {
            passed: true,
            ..Default::default()
        };
        self.state = LifecycleState::Collected;
        Ok(())
    }

    async fn exercise(&mut self, engine: &dyn TaskEngine, store: &dyn MetricsStore) -> DomainResult<()> {
        self.setup(engine, store).await?;
        self.add_data(engine, store).await?;
        self.state = LifecycleState::Awaiting;
        tokio::time::sleep(OUTPUT_GRACE_PERIOD).await;
        self.results(store).await
    }

    /// Drop both databases and the task. Failures are logged only.
    async fn teardown(&mut self, engine: &dyn TaskEngine, store: &dyn MetricsStore) {
        debug!(test = %self.name, "teardown");
        for binding in [&self.seed, &self.assert].into_iter().flatten() {
            if let Err(err) = store.drop_database(&binding.db).await {
                error!(db = %binding.db, error = %err, "Error performing teardown in cleanup");
            }
        }
        if let Err(err) = engine.delete_task(&self.task_name).await {
            error!(task = %self.task_name, error = %err, "Error performing teardown in delete");
        }
        self.state = LifecycleState::TornDown;
    }
}

#[async_trait]
impl UnitTest for DbOutTest {
    fn validate(&mut self) -> DomainResult<()> {
        if let Err(err) = self.bindings() {
            self.result = TestResult::errored(err.to_string());
            return Err(err);
        }
        self.result = TestResult::default();
        self.state = LifecycleState::Validated;
        Ok(())
    }

    #[instrument(skip_all, fields(test = %self.name, task = %self.task_name))]
    async fn run(&mut self, engine: &dyn TaskEngine, store: &dyn MetricsStore) -> DomainResult<()> {
        self.validate()?;

        let outcome = guarded(self.exercise(engine, store)).await;
        self.teardown(engine, store).await;

        let outcome = settle(outcome);
        if let Err(err) = &outcome {
            self.result = TestResult::errored(err.to_string());
        }
        outcome
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn test_type(&self) -> TestKind {
        TestKind::InfluxDbOut
    }

    fn task(&self) -> &Task {
        &self.task
    }

    fn set_task(&mut self, task: Task) {
        self.task = task;
    }

    fn passed(&self) -> bool {
        true
    }

    fn result(&self) -> &TestResult {
        &self.result
    }

    fn state(&self) -> LifecycleState {
        self.state
    }
}

impl fmt::Display for DbOutTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.result.error {
            write!(f, "TEST {} ({}) ERROR: {}", self.name, self.task_name, self.result)
        } else {
            write!(f, "TEST {} ({}) PASSED", self.name, self.task_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{mock_services, Call, Operation};

    fn declaration() -> TestDeclaration {
        TestDeclaration {
            name: "sum output".into(),
            task_name: "sum.tick".into(),
            test_type: Some("influxdbout".into()),
            script_type: Some("stream".into()),
            seed_db: "in".into(),
            assert_db: "out".into(),
            seed_data: vec!["cpu value=1".into(), "cpu value=2".into()],
            assert_data: vec!["sum value=3".into()],
            ..Default::default()
        }
    }

    fn task(task_type: TaskType) -> Task {
        Task {
            name: "sum.tick".into(),
            path: "scripts".into(),
            script: "stream|from()|sum('value')|influxDBOut()".into(),
            task_type,
            dbrps: vec![DbRp::new("in", ""), DbRp::new("out", "")],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifecycle_order() {
        let (kapacitor, influxdb, journal) = mock_services();
        let mut test = DbOutTest::init(&declaration(), task(TaskType::Stream));

        let started = tokio::time::Instant::now();
        test.run(&kapacitor, &influxdb).await.unwrap();
        assert!(started.elapsed() >= OUTPUT_GRACE_PERIOD);
        assert!(test.passed());
        assert!(test.observed().is_some());
        assert_eq!(test.assert_data(), ["sum value=3".to_string()]);
        assert_eq!(test.state(), LifecycleState::TornDown);

        let calls = journal.lock().await.clone();
        assert_eq!(
            calls[0],
            Call::CreateDatabase {
                db: "in".into(),
                rp: "autogen".into()
            }
        );
        assert_eq!(
            calls[1],
            Call::CreateDatabase {
                db: "out".into(),
                rp: "autogen".into()
            }
        );
        assert!(matches!(&calls[2], Call::LoadTask(p) if p.dbrps.as_ref().map(Vec::len) == Some(2)));
        assert!(matches!(&calls[3], Call::EngineIngest { db, .. } if db == "in"));
        assert_eq!(
            calls[4],
            Call::Query {
                db: "out".into(),
                query: ASSERT_QUERY.into()
            }
        );
        assert_eq!(calls[5], Call::DropDatabase("in".into()));
        assert_eq!(calls[6], Call::DropDatabase("out".into()));
        assert_eq!(calls[7], Call::DeleteTask("sum.tick".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_observed_rows_kept_from_assert_query() {
        let (kapacitor, influxdb, _) = mock_services();
        let mut rows = Map::new();
        rows.insert(
            "results".into(),
            serde_json::json!([{"series": [{"name": "sum", "values": [["t", 3]]}]}]),
        );
        let influxdb = influxdb.with_query_response(rows.clone());
        let mut test = DbOutTest::init(&declaration(), task(TaskType::Stream));

        test.run(&kapacitor, &influxdb).await.unwrap();
        assert_eq!(test.observed(), Some(&rows));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bindings_sent_even_when_self_declared() {
        let (kapacitor, influxdb, journal) = mock_services();
        let mut tsk = task(TaskType::Batch);
        tsk.script = format!("dbrp \"in\".\"autogen\"\n{}", tsk.script);
        let mut test = DbOutTest::init(&declaration(), tsk);

        test.run(&kapacitor, &influxdb).await.unwrap();

        let calls = journal.lock().await.clone();
        assert!(matches!(&calls[2], Call::LoadTask(p) if p.dbrps.is_some()));
        assert!(matches!(&calls[3], Call::StoreIngest { db, .. } if db == "in"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_failure_still_tears_down() {
        let (kapacitor, influxdb, journal) = mock_services();
        let influxdb = influxdb.failing_on(Operation::Query);
        let mut test = DbOutTest::init(&declaration(), task(TaskType::Stream));

        let err = test.run(&kapacitor, &influxdb).await.unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
        assert!(test.to_string().contains("ERROR"));

        let calls = journal.lock().await.clone();
        assert_eq!(calls.last(), Some(&Call::DeleteTask("sum.tick".into())));
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::DropDatabase(_))).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_missing_assert_db_is_config_error() {
        let (kapacitor, influxdb, journal) = mock_services();
        let mut decl = declaration();
        decl.assert_db.clear();
        let mut test = DbOutTest::init(&decl, task(TaskType::Stream));

        let err = test.run(&kapacitor, &influxdb).await.unwrap_err();
        assert!(err.is_config());
        assert!(test.result().error);
        assert!(journal.lock().await.is_empty());
    }
}
