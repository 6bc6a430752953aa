//! Duplicate Function Detector
//!
//! Flags function names declared in more than one file. Test files and
//! generic names are ignored, and a name whose every declaration sits in a
//! different independent package is not flagged: those packages are separate
//! codebases where reuse is expected.

use crate::config::DuplicatePolicy;
use crate::detectors::packages::PackageClassifier;
use crate::models::{CodeFile, FunctionLocations};
use crate::parsers::{record_functions, FunctionExtractor};
use std::collections::BTreeSet;
use tracing::debug;

pub struct DuplicateFunctionDetector<'a> {
    extractor: &'a FunctionExtractor,
    classifier: &'a dyn PackageClassifier,
    policy: &'a DuplicatePolicy,
}

impl<'a> DuplicateFunctionDetector<'a> {
    pub fn new(
        extractor: &'a FunctionExtractor,
        classifier: &'a dyn PackageClassifier,
        policy: &'a DuplicatePolicy,
    ) -> Self {
        Self {
            extractor,
            classifier,
            policy,
        }
    }

    /// Every non-generic function name in non-test files, with its locations
    pub fn function_locations(&self, files: &[CodeFile]) -> FunctionLocations {
        let mut locations = FunctionLocations::new();
        for file in files {
            if self.policy.is_test_file(file.file_name()) {
                continue;
            }
            let names = self.extractor.extract_file(&file.path);
            record_functions(&mut locations, names, &file.relative, self.policy);
        }
        for paths in locations.values_mut() {
            paths.sort();
        }
        locations
    }

    /// Names declared in two or more files that count as real duplicates
    pub fn detect(&self, files: &[CodeFile]) -> FunctionLocations {
        let duplicates: FunctionLocations = self
            .function_locations(files)
            .into_iter()
            .filter(|(_, paths)| paths.len() >= 2)
            .filter(|(name, paths)| {
                let independent = is_split_across_packages(paths, self.classifier);
                if independent {
                    debug!("{} only reused across independent packages", name);
                }
                !independent
            })
            .collect();

        debug!("Found {} duplicate function names", duplicates.len());
        duplicates
    }
}

/// True when no location is core code and no two locations share a package.
pub fn is_split_across_packages(paths: &[String], classifier: &dyn PackageClassifier) -> bool {
    let mut keys = BTreeSet::new();
    for path in paths {
        match classifier.package_key(path) {
            Some(key) => {
                keys.insert(key);
            }
            None => return false,
        }
    }
    keys.len() == paths.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::IndependentPackages;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) -> CodeFile {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        CodeFile::new(root, path, content.lines().count())
    }

    fn detect(files: &[CodeFile]) -> FunctionLocations {
        let extractor = FunctionExtractor::default();
        let packages = IndependentPackages::default();
        let policy = DuplicatePolicy::default();
        DuplicateFunctionDetector::new(&extractor, &packages, &policy).detect(files)
    }

    #[test]
    fn test_core_and_extension_flagged() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "src/util.ts", "export function parseConfig() {}\n"),
            write(dir.path(), "extensions/foo/util.ts", "export function parseConfig() {}\n"),
        ];
        let dupes = detect(&files);
        assert_eq!(
            dupes.get("parseConfig"),
            Some(&vec!["extensions/foo/util.ts".to_string(), "src/util.ts".to_string()])
        );
    }

    #[test]
    fn test_distinct_extensions_not_flagged() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "extensions/foo/util.ts", "function parseConfig() {}\n"),
            write(dir.path(), "extensions/bar/util.ts", "function parseConfig() {}\n"),
        ];
        assert!(detect(&files).is_empty());
    }

    #[test]
    fn test_adding_core_location_lists_all_three() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "extensions/a/x.ts", "const shared = () => 1;\n"),
            write(dir.path(), "extensions/b/y.ts", "const shared = () => 1;\n"),
            write(dir.path(), "src/z.ts", "const shared = () => 1;\n"),
        ];
        let dupes = detect(&files);
        assert_eq!(
            dupes.get("shared"),
            Some(&vec![
                "extensions/a/x.ts".to_string(),
                "extensions/b/y.ts".to_string(),
                "src/z.ts".to_string(),
            ])
        );
    }

    #[test]
    fn test_same_package_twice_flagged() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "extensions/a/one.ts", "function helper() {}\n"),
            write(dir.path(), "extensions/a/two.ts", "function helper() {}\n"),
            write(dir.path(), "extensions/b/three.ts", "function helper() {}\n"),
        ];
        assert_eq!(detect(&files).get("helper").map(Vec::len), Some(3));
    }

    #[test]
    fn test_ui_and_app_are_independent() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "ui/src/format.ts", "function formatDuration() {}\n"),
            write(dir.path(), "apps/web/format.ts", "function formatDuration() {}\n"),
        ];
        assert!(detect(&files).is_empty());
    }

    #[test]
    fn test_generic_names_and_test_files_ignored() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "src/a.ts", "function render() {}\nfunction makeUser() {}\n"),
            write(dir.path(), "src/b.ts", "function render() {}\n"),
            write(dir.path(), "src/a.test.ts", "function makeUser() {}\n"),
        ];
        assert!(detect(&files).is_empty());
    }

    #[test]
    fn test_only_function_extensions_contribute() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "src/a.ts", "function loadAll() {}\n"),
            write(dir.path(), "src/b.js", "function loadAll() {}\n"),
        ];
        assert!(detect(&files).is_empty());
    }

    #[test]
    fn test_order_independent() {
        let dir = tempdir().unwrap();
        let mut files = vec![
            write(dir.path(), "src/z.ts", "function alpha() {}\nfunction beta() {}\n"),
            write(dir.path(), "src/a.ts", "function alpha() {}\n"),
            write(dir.path(), "extensions/m/q.ts", "function beta() {}\n"),
            write(dir.path(), "lib/k.ts", "function alpha() {}\n"),
        ];
        let forward = detect(&files);
        files.reverse();
        let backward = detect(&files);
        files.swap(0, 2);
        let shuffled = detect(&files);
        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
        assert_eq!(forward.get("alpha").map(Vec::len), Some(3));
    }

    #[test]
    fn test_injected_classifier() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "plugins/a/x.ts", "function connectDb() {}\n"),
            write(dir.path(), "plugins/b/x.ts", "function connectDb() {}\n"),
        ];
        let extractor = FunctionExtractor::default();
        let policy = DuplicatePolicy::default();

        let plugin_packages = |rel: &str| -> Option<String> {
            let mut parts = rel.split('/');
            match (parts.next(), parts.next()) {
                (Some("plugins"), Some(name)) => Some(format!("plugins/{name}")),
                _ => None,
            }
        };
        let dupes =
            DuplicateFunctionDetector::new(&extractor, &plugin_packages, &policy).detect(&files);
        assert!(dupes.is_empty());

        // The default policy sees plugins/ as core code
        assert_eq!(detect(&files).get("connectDb").map(Vec::len), Some(2));
    }

    #[test]
    fn test_split_check() {
        let packages = IndependentPackages::default();
        let split = vec!["extensions/a/x.ts".to_string(), "extensions/b/x.ts".to_string()];
        assert!(is_split_across_packages(&split, &packages));
        let shared = vec!["extensions/a/x.ts".to_string(), "extensions/a/y.ts".to_string()];
        assert!(!is_split_across_packages(&shared, &packages));
        let core = vec!["extensions/a/x.ts".to_string(), "src/y.ts".to_string()];
        assert!(!is_split_across_packages(&core, &packages));
    }
}
