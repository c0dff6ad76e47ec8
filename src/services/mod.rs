//! Test lifecycle services: compilation, the two test kinds, the factory
//! and the sequential runner.

pub mod alert_status;
pub mod db_out_test;
pub mod task_compiler;
pub mod test_factory;
pub mod test_runner;

pub use alert_test::AlertTest;
pub use db_out_test::DbOutTest;
pub use test_factory::{load_tests_from_file_system, load_tests_from_yaml_file, new_test, parse_tests};
pub use test_runner::{RunSummary, TestOutcome, TestRunner};
pub use unit_test::{LifecycleState, TestCollection, UnitTest};
