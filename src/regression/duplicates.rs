//! Duplicate regressions
//!
//! A duplicate is new when it involves at least one changed file and was not
//! already a duplicate at the base ref. History is only read for the files
//! involved in candidate duplicates, never for the whole repository, so the
//! cost tracks the size of the change rather than the size of the repo.

use crate::config::DuplicatePolicy;
use crate::git::VersionControl;
use crate::models::FunctionLocations;
use crate::parsers::{record_functions, FunctionExtractor};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Current duplicates that were not duplicates at `reference`.
///
/// # Arguments
/// * `current` - Duplicate mapping for the working tree
/// * `changed` - Scan-root-relative paths changed since `reference`
pub fn find_duplicate_regressions(
    current: &FunctionLocations,
    changed: &BTreeSet<String>,
    vcs: &dyn VersionControl,
    reference: &str,
    extractor: &FunctionExtractor,
    policy: &DuplicatePolicy,
) -> FunctionLocations {
    if current.is_empty() || changed.is_empty() {
        return FunctionLocations::new();
    }

    let candidates: FunctionLocations = current
        .iter()
        .filter(|(_, paths)| paths.iter().any(|p| changed.contains(p)))
        .map(|(name, paths)| (name.clone(), paths.clone()))
        .collect();

    if candidates.is_empty() {
        return FunctionLocations::new();
    }

    let files_to_check: BTreeSet<&str> = candidates
        .values()
        .flat_map(|paths| paths.iter().map(String::as_str))
        .collect();
    debug!(
        "Checking {} duplicate candidates across {} files at {}",
        candidates.len(),
        files_to_check.len(),
        reference
    );

    let mut base_locations = FunctionLocations::new();
    for path in files_to_check {
        if !extractor.handles(Path::new(path)) {
            continue;
        }
        let Some(content) = vcs.content_at(path, reference) else {
            continue;
        };
        let names = extractor.extract(Path::new(path), &content);
        record_functions(&mut base_locations, names, path, policy);
    }

    candidates
        .into_iter()
        .filter(|(name, _)| base_locations.get(name).map_or(0, Vec::len) < 2)
        .collect()
}
