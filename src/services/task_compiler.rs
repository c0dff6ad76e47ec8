//! Task compilation: reads a TICKscript from disk and binds it to the
//! databases a declaration names.
//!
//! Also hosts the two pure script transformations applied when a task is
//! submitted to Kapacitor: self-declared `dbrp` detection and the batch
//! `every(...)` rewrite.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{DbRp, Task, TaskPayload, TaskType, TestDeclaration};
use crate::domain::ports::TaskEngine;

/// Status every test task is loaded with.
pub const TASK_STATUS_ENABLED: &str = "enabled";

/// Matches a line declaring `dbrp "db"."rp"` inside a script.
static DBRP_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^dbrp "\w+"\."\w+"$"#).expect("valid dbrp regex"));

/// Matches a batch cadence such as `every(22h)`.
static BATCH_EVERY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"every\((.*?)\)").expect("valid every regex"));

/// Build the [`Task`] for a declaration, reading `scripts_dir/<task_name>`.
pub fn compile(declaration: &TestDeclaration, scripts_dir: &Path) -> DomainResult<Task> {
    let task_type = declaration.task_type().ok_or_else(|| {
        DomainError::Config(format!(
            "test {:?} does not declare a stream or batch script type",
            declaration.name
        ))
    })?;

    let path = scripts_dir.join(&declaration.task_name);
    let script = std::fs::read_to_string(&path).map_err(|e| DomainError::ScriptNotFound {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    debug!(task = %declaration.task_name, path = %path.display(), "read TICKscript");

    let dbrps = declaration
        .seed_binding()
        .into_iter()
        .chain(declaration.assert_binding())
        .collect();

    Ok(Task {
        name: declaration.task_name.clone(),
        path: scripts_dir.to_path_buf(),
        script,
        task_type,
        dbrps,
    })
}

/// Whether the script binds its own databases with a `dbrp` statement.
pub fn declares_dbrp(script: &str) -> bool {
    DBRP_DECLARATION.is_match(script)
}

/// Force every batch query to run each second so tests need not wait for
/// the real cadence.
pub fn batch_replace_every(script: &str) -> String {
    BATCH_EVERY.replace_all(script, "every(1s)").into_owned()
}

/// Payload that defines and enables `task` with the given bindings.
///
/// Batch scripts get their cadence rewritten.
pub fn task_payload(task: &Task, dbrps: Option<Vec<DbRp>>) -> TaskPayload {
    let script = match task.task_type {
        TaskType::Batch => batch_replace_every(&task.script),
        TaskType::Stream => task.script.clone(),
    };
    TaskPayload {
        id: task.name.clone(),
        task_type: task.task_type,
        script,
        status: TASK_STATUS_ENABLED.to_string(),
        dbrps,
    }
}

/// Submit `task` to the task engine.
pub async fn load_task(
    engine: &dyn TaskEngine,
    task: &Task,
    dbrps: Option<Vec<DbRp>>,
) -> DomainResult<()> {
    let payload = task_payload(task, dbrps);
    debug!(task = %payload.id, script = %payload.script, "loading task");
    engine.load_task(&payload).await
}
