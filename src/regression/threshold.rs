//! Threshold regressions
//!
//! A file at or over the line threshold is a regression when it is new, when
//! it was under the threshold at the base ref, or when it was already over
//! and got larger. Files that stayed the same size or shrank are not
//! reported again, so an unchanged large file never fails CI twice.

use crate::git::VersionControl;
use crate::inventory::count_lines;
use crate::models::{CodeFile, ThresholdViolation, ViolationKind};
use serde::Serialize;
use tracing::debug;

/// Files that newly crossed the threshold and files already over it that grew
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThresholdRegressions {
    pub crossed: Vec<ThresholdViolation>,
    pub grew: Vec<ThresholdViolation>,
}

impl ThresholdRegressions {
    pub fn is_empty(&self) -> bool {
        self.crossed.is_empty() && self.grew.is_empty()
    }
}

/// Classify one file from its current and base-ref line counts.
///
/// `previous` is `None` when the file did not exist at the base ref.
pub fn classify(lines: usize, previous: Option<usize>, threshold: usize) -> Option<ViolationKind> {
    if lines < threshold {
        return None;
    }
    match previous {
        None => Some(ViolationKind::Crossed),
        Some(before) if before < threshold => Some(ViolationKind::Crossed),
        Some(before) if lines > before => Some(ViolationKind::Grew),
        Some(_) => None,
    }
}

/// Line count of `path` at `reference`, `None` when absent there
pub fn line_count_at(vcs: &dyn VersionControl, path: &str, reference: &str) -> Option<usize> {
    vcs.content_at(path, reference)
        .map(|content| count_lines(content.as_bytes()))
}

/// Compare every file at or over `threshold` against its size at `reference`.
///
/// Files under the threshold are never looked up in history.
pub fn find_threshold_regressions(
    files: &[CodeFile],
    threshold: usize,
    vcs: &dyn VersionControl,
    reference: &str,
) -> ThresholdRegressions {
    let mut regressions = ThresholdRegressions::default();

    for file in files.iter().filter(|f| f.lines >= threshold) {
        let previous = line_count_at(vcs, &file.relative, reference);
        let Some(kind) = classify(file.lines, previous, threshold) else {
            continue;
        };
        let violation = ThresholdViolation {
            path: file.relative.clone(),
            lines: file.lines,
            previous,
            kind,
        };
        match kind {
            ViolationKind::Crossed => regressions.crossed.push(violation),
            ViolationKind::Grew => regressions.grew.push(violation),
        }
    }

    debug!(
        "{} files crossed and {} grew past {} lines",
        regressions.crossed.len(),
        regressions.grew.len(),
        threshold
    );
    regressions
}
