//! Console reporting.

use console::style;

use crate::services::{RunSummary, TestOutcome};

const LOGO: [&str; 8] = [
    r"  _                          _ _                                _ _            ",
    r" | |                        (_) |                              (_) |           ",
    r" | | ____ _ _ __   __ _  ___ _| |_ ___  _ __ ______ _   _ _ __  _| |_          ",
    r" | |/ / _` | '_ \ / _` |/ __| | __/ _ \| '__|______| | | | '_ \| | __|      ",
    r" |   < (_| | |_) | (_| | (__| | || (_) | |         | |_| | | | | | |_          ",
    r" |_|\_\__,_| .__/ \__,_|\___|_|\__\___/|_|          \__,_|_| |_|_|\__| ",
    r"           | |                                                                 ",
    r"           |_|                                                                 ",
];

/// Start-up banner.
pub fn render_welcome() -> String {
    let mut banner = LOGO.join("\n");
    banner.push_str(&format!(
        "\nThe unit test framework for TICK scripts (v{})\n",
        env!("CARGO_PKG_VERSION")
    ));
    banner
}

/// One test line, green when it passed and red otherwise.
pub fn render_outcome(outcome: &TestOutcome) -> String {
    if outcome.passed {
        style(&outcome.summary).green().to_string()
    } else {
        style(&outcome.summary).red().to_string()
    }
}

/// Final tally line.
pub fn render_summary(summary: &RunSummary) -> String {
    let line = format!(
        "{} passed, {} failed, {} errored",
        summary.passed(),
        summary.failed(),
        summary.errored()
    );
    if summary.all_passed() {
        style(line).green().bold().to_string()
    } else {
        style(line).red().bold().to_string()
    }
}
