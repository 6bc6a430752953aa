//! File inventory: walk the scan root and count lines of every code file.
//!
//! Skip directories are matched by name and pruned during descent, so large
//! dependency trees like `node_modules` are never entered. Files that cannot
//! be read count as zero lines; the walk never aborts on a single file.

use crate::config::ScanConfig;
use crate::models::CodeFile;
use ignore::WalkBuilder;
use std::path::Path;
use tracing::debug;

/// Count newline-delimited records.
///
/// A trailing record without a final newline still counts. Works on raw
/// bytes, so content that is not valid UTF-8 is counted like any other.
pub fn count_lines(bytes: &[u8]) -> usize {
    let newlines = memchr::memchr_iter(b'\n', bytes).count();
    match bytes.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

/// Line count of a file on disk, zero when it cannot be read
pub fn count_file_lines(path: &Path) -> usize {
    match std::fs::read(path) {
        Ok(bytes) => count_lines(&bytes),
        Err(e) => {
            debug!("Could not read {}: {}", path.display(), e);
            0
        }
    }
}

/// Collect every recognized code file under `root`, ordered by relative path
pub fn find_code_files(root: &Path, config: &ScanConfig) -> Vec<CodeFile> {
    let scan = config.clone();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if !is_dir || entry.depth() == 0 {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !scan.is_skipped_dir(name))
        });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        // Symlinked files count; symlinked directories are not descended
        let path = entry.path();
        let is_file = entry.file_type().is_some_and(|t| {
            t.is_file() || (t.is_symlink() && path.is_file())
        });
        if !is_file {
            continue;
        }
        if !config.is_code_file(path) {
            continue;
        }
        let lines = count_file_lines(path);
        files.push(CodeFile::new(root, path.to_path_buf(), lines));
    }

    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    debug!("Inventory found {} code files under {}", files.len(), root.display());
    files
}
