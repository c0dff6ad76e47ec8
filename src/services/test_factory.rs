//! Builds unit tests from declarations and loads them from disk.

use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use super::alert_test::AlertTest;
use super::db_out_test::DbOutTest;
use super::task_compiler;
use super::unit_test::{TestCollection, UnitTest};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{TestDeclaration, TestKind, TestSuite};

/// Build the test matching the declaration's kind.
///
/// The task is compiled first; a missing script fails before any test is
/// constructed.
pub fn new_test(declaration: &TestDeclaration, scripts_dir: &Path) -> DomainResult<Box<dyn UnitTest>> {
    let Some(kind) = declaration.kind() else {
        return Err(DomainError::UnsupportedType {
            kind: declaration.kind_name().to_string(),
            declaration: format!("{declaration:?}"),
        });
    };

    let task = task_compiler::compile(declaration, scripts_dir)?;
    debug!(test = %declaration.name, %kind, "building test");

    Ok(match kind {
        TestKind::InfluxDbOut => Box::new(DbOutTest::init(declaration, task)),
        TestKind::Stream | TestKind::Batch => Box::new(AlertTest::init(declaration, task)),
    })
}

/// Parse a YAML document with a top-level `Tests:` list.
pub fn parse_tests(yaml: &str, scripts_dir: &Path) -> DomainResult<TestCollection> {
    let suite: TestSuite = serde_yaml::from_str(yaml)?;
    suite
        .tests
        .iter()
        .map(|declaration| new_test(declaration, scripts_dir))
        .collect()
}

/// Load every test declared in one YAML file.
pub fn load_tests_from_yaml_file(file: &Path, scripts_dir: &Path) -> DomainResult<TestCollection> {
    let yaml = std::fs::read_to_string(file)
        .map_err(|e| DomainError::Io(format!("{}: {e}", file.display())))?;
    parse_tests(&yaml, scripts_dir)
}

/// Load tests from a YAML file, or from every `.yml`/`.yaml` file under a
/// directory, in walk order.
pub fn load_tests_from_file_system(tests_path: &Path, scripts_dir: &Path) -> DomainResult<TestCollection> {
    let metadata = std::fs::metadata(tests_path)
        .map_err(|e| DomainError::Io(format!("{}: {e}", tests_path.display())))?;

    let files = if metadata.is_dir() {
        WalkDir::new(tests_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext == "yml" || ext == "yaml")
            })
            .collect()
    } else {
        vec![tests_path.to_path_buf()]
    };

    let mut tests = TestCollection::new();
    for file in &files {
        let loaded = load_tests_from_yaml_file(file, scripts_dir)?;
        info!(file = %file.display(), count = loaded.len(), "loaded test definitions");
        tests.extend(loaded);
    }
    Ok(tests)
}
