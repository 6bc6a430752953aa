//! GitHub Actions workflow commands
//!
//! `::error file=...` lines put each violation inline on the PR diff.

use super::thousands;
use crate::regression::DeltaReport;

/// Environment flag set by GitHub Actions runners
pub const GITHUB_ACTIONS_ENV: &str = "GITHUB_ACTIONS";
/// Path of the job summary file
pub const STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Whether the current process runs inside GitHub Actions
pub fn in_github_actions() -> bool {
    std::env::var(GITHUB_ACTIONS_ENV).is_ok_and(|v| v == "true")
}

/// One `::error` annotation per violating file and per duplicate location
pub fn annotations(report: &DeltaReport) -> Vec<String> {
    let threshold = report.threshold;
    let mut lines = Vec::new();

    for v in &report.crossed {
        let line = match v.previous {
            None => format!(
                "::error file={path},title=File over {threshold} lines::{path} is {lines} lines (new file). Split into smaller modules.",
                path = v.path,
                lines = thousands(v.lines),
            ),
            Some(before) => format!(
                "::error file={path},title=File crossed {threshold} lines::{path} grew from {before} to {lines} lines (+{delta}). Split into smaller modules.",
                path = v.path,
                before = thousands(before),
                lines = thousands(v.lines),
                delta = thousands(v.delta()),
            ),
        };
        lines.push(line);
    }

    for v in &report.grew {
        lines.push(format!(
            "::error file={path},title=Large file grew larger::{path} is already {before} lines and grew to {lines} (+{delta}). Consider refactoring.",
            path = v.path,
            before = thousands(v.previous.unwrap_or(0)),
            lines = thousands(v.lines),
            delta = thousands(v.delta()),
        ));
    }

    for (name, paths) in &report.new_duplicates {
        for path in paths {
            lines.push(format!(
                "::error file={path},title=Duplicate function '{name}'::Function '{name}' appears in multiple files. Centralize or rename."
            ));
        }
    }

    lines
}
