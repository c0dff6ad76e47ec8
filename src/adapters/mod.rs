//! Adapters for Kapacitor and InfluxDB.

pub mod http;
pub mod influxdb;
pub mod kapacitor;
pub mod mock;

pub use http::build_client;
pub use influxdb::InfluxdbClient;
pub use kapacitor::KapacitorClient;
