//! Observed test outcome and its comparison against the expectation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Alert trigger counts, as expected by a declaration or observed on a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertCounts {
    pub ok: u64,
    pub warn: u64,
    pub crit: u64,
}

impl AlertCounts {
    /// Read the `*_triggered` statistics reported by Kapacitor alert nodes.
    /// Missing statistics count as zero.
    pub fn from_stats(stats: &BTreeMap<String, u64>) -> Self {
        let get = |key: &str| stats.get(key).copied().unwrap_or_default();
        Self {
            ok: get("oks_triggered"),
            warn: get("warns_triggered"),
            crit: get("crits_triggered"),
        }
    }
}

impl fmt::Display for AlertCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ok: {}, warn: {}, crit: {}}}", self.ok, self.warn, self.crit)
    }
}

/// Outcome of a single test run.
///
/// When `error` is set the test could not be evaluated and `passed` carries
/// no meaning. Otherwise `passed` reflects an exact count comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub counts: AlertCounts,
    pub message: String,
    pub passed: bool,
    pub error: bool,
}

impl TestResult {
    /// Wrap counts reported by Kapacitor. `passed` is decided by [`compare`](Self::compare).
    pub fn from_observed(counts: AlertCounts) -> Self {
        Self {
            counts,
            ..Default::default()
        }
    }

    /// An outcome that could not be evaluated, carrying only a diagnostic.
    pub fn errored(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
            ..Default::default()
        }
    }

    /// Exact-match comparison of every count against the expectation.
    pub fn compare(&mut self, expected: &AlertCounts) {
        self.passed = self.counts == *expected;
        self.message = if self.passed {
            String::new()
        } else {
            format!("expected {expected}, got {}", self.counts)
        };
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.error {
            return f.write_str(&self.message);
        }
        if self.passed {
            write!(f, "PASSED {}", self.counts)
        } else {
            write!(f, "FAILED {}", self.message)
        }
    }
}
