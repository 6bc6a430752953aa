//! Core data models for codesize
//!
//! These models are shared by the inventory, the detectors, the regression
//! analyzers and the reporters. Everything is recomputed per run.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Function name → relative paths of the files declaring it (sorted).
pub type FunctionLocations = BTreeMap<String, Vec<String>>;

/// Render `path` relative to `root` with forward slashes.
///
/// Paths outside `root` are rendered as given.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}

/// A counted source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFile {
    /// Absolute path on disk
    #[serde(skip)]
    pub path: PathBuf,
    /// Path relative to the scan root, forward slashes
    #[serde(rename = "path")]
    pub relative: String,
    /// Newline-delimited record count
    pub lines: usize,
}

impl CodeFile {
    pub fn new(root: &Path, path: PathBuf, lines: usize) -> Self {
        let relative = relative_slash_path(root, &path);
        Self {
            path,
            relative,
            lines,
        }
    }

    /// Final path segment
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }
}

/// How a file over the threshold regressed against the base ref
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// New file, or it was under the threshold at the base ref
    Crossed,
    /// Already over the threshold at the base ref and got larger
    Grew,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::Crossed => write!(f, "crossed"),
            ViolationKind::Grew => write!(f, "grew"),
        }
    }
}

/// A file at or over the threshold that regressed since the base ref
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThresholdViolation {
    /// Path relative to the scan root
    pub path: String,
    /// Current line count
    pub lines: usize,
    /// Line count at the base ref, `None` when the file did not exist there
    pub previous: Option<usize>,
    pub kind: ViolationKind,
}

impl ThresholdViolation {
    /// Lines added since the base ref (a new file counts from zero)
    pub fn delta(&self) -> usize {
        self.lines.saturating_sub(self.previous.unwrap_or(0))
    }
}

/// Files and line totals for one top-level package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageStats {
    pub name: String,
    pub files: usize,
    pub lines: usize,
}

impl PackageStats {
    pub fn average(&self) -> usize {
        if self.files == 0 {
            0
        } else {
            self.lines / self.files
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_slash_path() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_slash_path(root, Path::new("/repo/src/a.ts")),
            "src/a.ts"
        );
        assert_eq!(
            relative_slash_path(root, Path::new("/elsewhere/b.ts")),
            "/elsewhere/b.ts"
        );
    }

    #[test]
    fn test_code_file_name() {
        let file = CodeFile::new(Path::new("/repo"), PathBuf::from("/repo/src/x/util.ts"), 3);
        assert_eq!(file.relative, "src/x/util.ts");
        assert_eq!(file.file_name(), "util.ts");
    }

    #[test]
    fn test_violation_delta() {
        let crossed = ThresholdViolation {
            path: "a.ts".into(),
            lines: 1200,
            previous: None,
            kind: ViolationKind::Crossed,
        };
        assert_eq!(crossed.delta(), 1200);

        let grew = ThresholdViolation {
            path: "b.ts".into(),
            lines: 1200,
            previous: Some(1100),
            kind: ViolationKind::Grew,
        };
        assert_eq!(grew.delta(), 100);
    }

    #[test]
    fn test_package_average() {
        let stats = PackageStats {
            name: "src".into(),
            files: 3,
            lines: 10,
        };
        assert_eq!(stats.average(), 3);
        assert_eq!(PackageStats::default().average(), 0);
    }
}
