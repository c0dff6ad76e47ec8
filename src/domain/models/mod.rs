//! Domain models for kapacitor-unit.

pub mod config;
pub mod declaration;
pub mod result;
pub mod task;

pub use config::{Config, LoggingConfig};
pub use declaration::{TestDeclaration, TestKind, TestSuite};
pub use result::{AlertCounts, TestResult};
pub use task::{DbRp, Task, TaskPayload, TaskType, DEFAULT_RETENTION_POLICY};
