//! Regression analysis against a base git ref
//!
//! Delta mode only reports what a change made worse:
//! - `threshold` - files that crossed the line threshold or grew while over it
//! - `duplicates` - function names that became duplicated
//!
//! Both analyzers take a `VersionControl` so they can run against synthetic
//! history in tests.

mod duplicates;
mod threshold;

pub use duplicates::find_duplicate_regressions;
pub use threshold::{classify, find_threshold_regressions, line_count_at, ThresholdRegressions};

use crate::config::ProjectConfig;
use crate::detectors::DuplicateFunctionDetector;
use crate::git::VersionControl;
use crate::models::{CodeFile, FunctionLocations, ThresholdViolation};
use crate::parsers::FunctionExtractor;
use serde::Serialize;

/// Everything a delta run found
#[derive(Debug, Clone, Serialize)]
pub struct DeltaReport {
    /// Base ref the tree was compared against
    pub reference: String,
    pub threshold: usize,
    pub files_scanned: usize,
    pub crossed: Vec<ThresholdViolation>,
    pub grew: Vec<ThresholdViolation>,
    pub new_duplicates: FunctionLocations,
}

impl DeltaReport {
    pub fn has_violations(&self) -> bool {
        !self.crossed.is_empty() || !self.grew.is_empty() || !self.new_duplicates.is_empty()
    }
}

/// Run both regression analyzers over the current inventory.
///
/// The changed-path set is only requested when there are current duplicates
/// to scope.
pub fn analyze_delta(
    files: &[CodeFile],
    config: &ProjectConfig,
    vcs: &dyn VersionControl,
    reference: &str,
    threshold: usize,
) -> DeltaReport {
    let ThresholdRegressions { crossed, grew } =
        find_threshold_regressions(files, threshold, vcs, reference);

    let extractor = FunctionExtractor::from_policy(&config.duplicates);
    let detector = DuplicateFunctionDetector::new(&extractor, &config.packages, &config.duplicates);
    let current = detector.detect(files);

    let new_duplicates = if current.is_empty() {
        FunctionLocations::new()
    } else {
        let changed = vcs.changed_paths(reference);
        find_duplicate_regressions(
            &current,
            &changed,
            vcs,
            reference,
            &extractor,
            &config.duplicates,
        )
    };

    DeltaReport {
        reference: reference.to_string(),
        threshold,
        files_scanned: files.len(),
        crossed,
        grew,
        new_duplicates,
    }
}
