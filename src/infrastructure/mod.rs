//! Infrastructure layer module
//!
//! Configuration management and logging for the command line tool.

pub mod config;
pub mod logging;
