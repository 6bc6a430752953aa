//! Package boundaries
//!
//! A package key groups files that evolve together. Files in different
//! independent packages (one extension, one app target, the browser UI) are
//! treated as separate codebases, so reusing a function name across them is
//! not duplication. Files with no key are core/shared code.

use serde::Deserialize;
use std::collections::BTreeSet;

/// Maps a scan-root-relative path (forward slashes) to its independent package
pub trait PackageClassifier {
    /// `None` means core/shared code
    fn package_key(&self, relative: &str) -> Option<String>;
}

impl<F> PackageClassifier for F
where
    F: Fn(&str) -> Option<String>,
{
    fn package_key(&self, relative: &str) -> Option<String> {
        self(relative)
    }
}

/// Path-prefix package policy for a monorepo
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndependentPackages {
    /// `<root>/<name>/...` is package `<root>/<name>` (e.g. `extensions/telegram`)
    pub nested_roots: BTreeSet<String>,
    /// `<root>/...` is a single package `<root>` (e.g. `ui`)
    pub single_roots: BTreeSet<String>,
    /// Top-level directories broken out in the per-package line report
    pub report_roots: BTreeSet<String>,
}

impl Default for IndependentPackages {
    fn default() -> Self {
        Self {
            nested_roots: ["extensions", "apps"].iter().map(|s| s.to_string()).collect(),
            single_roots: ["ui"].iter().map(|s| s.to_string()).collect(),
            report_roots: [
                "src",
                "apps",
                "extensions",
                "packages",
                "scripts",
                "ui",
                "test",
                "docs",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl IndependentPackages {
    /// Reporting bucket: the first path segment if it is a known package
    /// directory, otherwise `root`.
    pub fn report_package(&self, relative: &str) -> String {
        match relative.split('/').next() {
            Some(first) if self.report_roots.contains(first) => first.to_string(),
            _ => "root".to_string(),
        }
    }
}

impl PackageClassifier for IndependentPackages {
    fn package_key(&self, relative: &str) -> Option<String> {
        let mut parts = relative.split('/');
        let first = parts.next()?;
        let second = parts.next();

        if let Some(second) = second {
            if self.nested_roots.contains(first) {
                return Some(format!("{first}/{second}"));
            }
        }
        if self.single_roots.contains(first) {
            return Some(first.to_string());
        }
        None
    }
}
