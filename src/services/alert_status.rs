//! Aggregation of alert statistics out of a Kapacitor task document.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::errors::{DomainError, DomainResult};

/// Prefix of the node-stats keys that belong to alert nodes.
const ALERT_NODE_PREFIX: &str = "alert";

/// Sum the statistics of every `alert*` node in `status.stats.node-stats`.
///
/// A task with several alert nodes reports the element-wise sum.
pub fn aggregate_alert_stats(task: &str, status: &Value) -> DomainResult<BTreeMap<String, u64>> {
    let nodes = status
        .pointer("/stats/node-stats")
        .and_then(Value::as_object)
        .ok_or_else(|| DomainError::NoAlertNode(task.to_string()))?;

    let mut totals = BTreeMap::new();
    let mut found = false;

    for (node, stats) in nodes.iter().filter(|(key, _)| key.starts_with(ALERT_NODE_PREFIX)) {
        found = true;
        let stats = stats.as_object().ok_or_else(|| DomainError::MalformedStatus {
            key: node.clone(),
        })?;
        for (key, value) in stats {
            let count = as_count(value).ok_or_else(|| DomainError::MalformedStatus {
                key: format!("{node}.{key}"),
            })?;
            *totals.entry(key.clone()).or_insert(0) += count;
        }
    }

    if !found {
        return Err(DomainError::NoAlertNode(task.to_string()));
    }
    Ok(totals)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64))
}
