//! Full-repository report: longest and shortest files, totals, per-package
//! breakdown, size warnings and duplicate function names.

use crate::config::ProjectConfig;
use crate::detectors::DuplicateFunctionDetector;
use crate::models::{CodeFile, FunctionLocations, PackageStats};
use crate::parsers::FunctionExtractor;
use serde::Serialize;
use std::collections::BTreeMap;

/// Report limits from the command line
#[derive(Debug, Clone, Copy)]
pub struct OverviewOptions {
    /// Files at or over this many lines are flagged as long
    pub threshold: usize,
    /// Files at or under this many lines are flagged as short
    pub min_threshold: usize,
    /// Longest files to list
    pub top: usize,
    /// Shortest files to list
    pub bottom: usize,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            threshold: 1000,
            min_threshold: 10,
            top: 20,
            bottom: 10,
        }
    }
}

/// One row of the longest/shortest listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedFile {
    pub path: String,
    pub lines: usize,
    /// Over the threshold (longest list) or suspiciously short (shortest list)
    pub flagged: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub threshold: usize,
    pub min_threshold: usize,
    pub longest: Vec<ListedFile>,
    pub shortest: Vec<ListedFile>,
    pub total_files: usize,
    pub total_lines: usize,
    pub average_lines: usize,
    /// Sorted by line count, largest first
    pub packages: Vec<PackageStats>,
    pub duplicates: FunctionLocations,
}

impl Overview {
    /// Long-file warnings (flagged rows of the longest listing)
    pub fn long_files(&self) -> impl Iterator<Item = &ListedFile> {
        self.longest.iter().filter(|f| f.flagged)
    }

    /// Short-file warnings (flagged rows of the shortest listing)
    pub fn short_files(&self) -> impl Iterator<Item = &ListedFile> {
        self.shortest.iter().filter(|f| f.flagged)
    }

    pub fn has_long_files(&self) -> bool {
        self.long_files().next().is_some()
    }
}

/// Build the full report for an inventory
pub fn build_overview(files: &[CodeFile], config: &ProjectConfig, options: OverviewOptions) -> Overview {
    let mut descending: Vec<&CodeFile> = files.iter().collect();
    descending.sort_by(|a, b| b.lines.cmp(&a.lines));
    let mut ascending: Vec<&CodeFile> = files.iter().collect();
    ascending.sort_by(|a, b| a.lines.cmp(&b.lines));

    let longest = descending
        .iter()
        .take(options.top)
        .map(|f| ListedFile {
            path: f.relative.clone(),
            lines: f.lines,
            flagged: f.lines >= options.threshold,
        })
        .collect();

    let shortest = ascending
        .iter()
        .take(options.bottom)
        .map(|f| ListedFile {
            path: f.relative.clone(),
            lines: f.lines,
            flagged: f.lines <= options.min_threshold
                && !config.short_files.is_expected_short(f.file_name()),
        })
        .collect();

    let total_files = files.len();
    let total_lines: usize = files.iter().map(|f| f.lines).sum();
    let average_lines = if total_files == 0 { 0 } else { total_lines / total_files };

    let extractor = FunctionExtractor::from_policy(&config.duplicates);
    let duplicates = DuplicateFunctionDetector::new(&extractor, &config.packages, &config.duplicates)
        .detect(files);

    Overview {
        threshold: options.threshold,
        min_threshold: options.min_threshold,
        longest,
        shortest,
        total_files,
        total_lines,
        average_lines,
        packages: package_breakdown(files, config),
        duplicates,
    }
}

fn package_breakdown(files: &[CodeFile], config: &ProjectConfig) -> Vec<PackageStats> {
    let mut by_name: BTreeMap<String, PackageStats> = BTreeMap::new();
    for file in files {
        let name = config.packages.report_package(&file.relative);
        let stats = by_name.entry(name.clone()).or_insert_with(|| PackageStats {
            name,
            ..Default::default()
        });
        stats.files += 1;
        stats.lines += file.lines;
    }
    let mut packages: Vec<PackageStats> = by_name.into_values().collect();
    packages.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.name.cmp(&b.name)));
    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn file(rel: &str, lines: usize) -> CodeFile {
        CodeFile::new(Path::new("/repo"), PathBuf::from(format!("/repo/{rel}")), lines)
    }

    fn options(top: usize, bottom: usize) -> OverviewOptions {
        OverviewOptions {
            threshold: 100,
            min_threshold: 5,
            top,
            bottom,
        }
    }

    #[test]
    fn test_longest_and_shortest() {
        let files = vec![
            file("src/a.ts", 150),
            file("src/b.ts", 50),
            file("src/c.ts", 3),
            file("src/index.ts", 1),
            file("ui/d.ts", 100),
        ];
        let overview = build_overview(&files, &ProjectConfig::default(), options(2, 2));

        let longest: Vec<_> = overview.longest.iter().map(|f| (f.path.as_str(), f.flagged)).collect();
        assert_eq!(longest, vec![("src/a.ts", true), ("ui/d.ts", true)]);

        // index.ts is a barrel export and is not warned about
        let shortest: Vec<_> = overview.shortest.iter().map(|f| (f.path.as_str(), f.flagged)).collect();
        assert_eq!(shortest, vec![("src/index.ts", false), ("src/c.ts", true)]);

        assert!(overview.has_long_files());
        assert_eq!(overview.long_files().count(), 2);
        assert_eq!(overview.short_files().count(), 1);
    }

    #[test]
    fn test_totals_and_packages() {
        let files = vec![
            file("src/a.ts", 30),
            file("src/b.ts", 10),
            file("extensions/x/c.ts", 50),
            file("setup.sh", 4),
            file("tools/gen.py", 6),
        ];
        let overview = build_overview(&files, &ProjectConfig::default(), OverviewOptions::default());
        assert_eq!(overview.total_files, 5);
        assert_eq!(overview.total_lines, 100);
        assert_eq!(overview.average_lines, 20);

        let packages: Vec<_> = overview
            .packages
            .iter()
            .map(|p| (p.name.as_str(), p.files, p.lines))
            .collect();
        assert_eq!(
            packages,
            vec![("extensions", 1, 50), ("src", 2, 40), ("root", 2, 10)]
        );
        assert!(!overview.has_long_files());
    }

    #[test]
    fn test_empty_inventory() {
        let overview = build_overview(&[], &ProjectConfig::default(), OverviewOptions::default());
        assert_eq!(overview.average_lines, 0);
        assert!(overview.longest.is_empty());
        assert!(overview.packages.is_empty());
        assert!(overview.duplicates.is_empty());
    }
}
