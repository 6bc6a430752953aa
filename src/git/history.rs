//! Historical file lookups using libgit2
//!
//! Content is read straight from the ref's tree and changes come from diffing
//! that tree against the index and working directory, so nothing is checked
//! out and a read-only worktree is fine.

use super::{GitError, VersionControl};
use crate::models::relative_slash_path;
use git2::{DiffOptions, ErrorCode, ObjectType, Repository, Tree};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Git-backed `VersionControl` rooted at a scan directory
pub struct GitRepo {
    repo: Repository,
    /// Scan root relative to the repository workdir, empty at the top level
    prefix: String,
}

impl GitRepo {
    /// Open the repository containing `scan_root`.
    ///
    /// # Arguments
    /// * `scan_root` - Directory being scanned (the repository root or below it)
    pub fn open(scan_root: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(scan_root).map_err(|source| GitError::Open {
            path: scan_root.to_path_buf(),
            source,
        })?;
        let workdir = repo.workdir().ok_or(GitError::Bare)?.canonicalize()?;
        let root = scan_root.canonicalize()?;
        let prefix = relative_slash_path(&workdir, &root);
        debug!(
            "Opened git repository at {:?} (scan prefix '{}')",
            repo.path(),
            prefix
        );
        Ok(Self { repo, prefix })
    }

    /// Scan-root-relative path → repository-relative path
    fn repo_path(&self, relative: &str) -> String {
        if self.prefix.is_empty() {
            relative.to_string()
        } else {
            format!("{}/{}", self.prefix, relative)
        }
    }

    /// Repository-relative path → scan-root-relative path, `None` outside the scan root
    fn scan_path(&self, repo_relative: &str) -> Option<String> {
        if self.prefix.is_empty() {
            return Some(repo_relative.to_string());
        }
        repo_relative
            .strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(str::to_string)
    }

    fn tree_at(&self, reference: &str) -> Result<Tree<'_>, GitError> {
        let invalid = |source| GitError::InvalidRef {
            reference: reference.to_string(),
            source,
        };
        self.repo
            .revparse_single(reference)
            .map_err(invalid)?
            .peel_to_tree()
            .map_err(invalid)
    }

    /// Content at `reference`, distinguishing "absent" (`Ok(None)`) from failure.
    pub fn try_content_at(&self, relative: &str, reference: &str) -> Result<Option<Vec<u8>>, GitError> {
        let tree = self.tree_at(reference)?;
        let repo_path = self.repo_path(relative);
        let entry = match tree.get_path(Path::new(&repo_path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if entry.kind() != Some(ObjectType::Blob) {
            return Ok(None);
        }
        let blob = self.repo.find_blob(entry.id())?;
        Ok(Some(blob.content().to_vec()))
    }

    /// Paths changed between `reference` and the working tree, including
    /// staged, unstaged and untracked files.
    pub fn try_changed_paths(&self, reference: &str) -> Result<BTreeSet<String>, GitError> {
        let tree = self.tree_at(reference)?;

        let mut opts = DiffOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))?;

        let mut paths = BTreeSet::new();
        for delta in diff.deltas() {
            for file in [delta.old_file(), delta.new_file()] {
                let Some(path) = file.path() else { continue };
                let repo_relative = path.to_string_lossy().replace('\\', "/");
                if let Some(relative) = self.scan_path(&repo_relative) {
                    paths.insert(relative);
                }
            }
        }
        Ok(paths)
    }
}

impl VersionControl for GitRepo {
    fn ref_exists(&self, reference: &str) -> bool {
        self.repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_commit())
            .is_ok()
    }

    fn content_at(&self, path: &str, reference: &str) -> Option<String> {
        match self.try_content_at(path, reference) {
            Ok(Some(bytes)) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Ok(None) => None,
            Err(e) => {
                warn!("git lookup failed for {} at {}: {}", path, reference, e);
                None
            }
        }
    }

    fn changed_paths(&self, reference: &str) -> BTreeSet<String> {
        match self.try_changed_paths(reference) {
            Ok(paths) => {
                debug!("{} paths changed since {}", paths.len(), reference);
                paths
            }
            Err(e) => {
                warn!("git diff against {} failed: {}", reference, e);
                BTreeSet::new()
            }
        }
    }
}
