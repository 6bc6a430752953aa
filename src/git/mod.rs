//! Version-control queries
//!
//! The regression analyzers only ever ask three questions of history: does a
//! ref resolve, what did a file look like at that ref, and which paths
//! changed since it. `VersionControl` is that boundary; `GitRepo` answers it
//! with libgit2 without touching the checkout.
//!
//! # Example
//!
//! ```no_run
//! use codesize::git::{GitRepo, VersionControl};
//! use std::path::Path;
//!
//! let git = GitRepo::open(Path::new("/path/to/repo")).unwrap();
//! if git.ref_exists("origin/main") {
//!     let old = git.content_at("src/main.ts", "origin/main");
//!     let changed = git.changed_paths("origin/main");
//! }
//! ```

pub mod history;

pub use history::GitRepo;

use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the git adapter
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open git repository at {path}: {source}")]
    Open { path: PathBuf, source: git2::Error },

    #[error("Repository has no working directory (bare repo?)")]
    Bare,

    #[error("Could not resolve ref '{reference}': {source}")]
    InvalidRef { reference: String, source: git2::Error },

    #[error("git query failed: {0}")]
    Query(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only access to file history.
///
/// Paths are relative to the scan root with forward slashes. Lookups never
/// fail from the caller's point of view: a failed query is logged and reads
/// as "absent" or "nothing changed".
pub trait VersionControl {
    /// Whether `reference` resolves to a commit
    fn ref_exists(&self, reference: &str) -> bool;

    /// File content at `reference`, `None` when it did not exist there
    fn content_at(&self, path: &str, reference: &str) -> Option<String>;

    /// Paths that differ between `reference` and the working tree
    fn changed_paths(&self, reference: &str) -> BTreeSet<String>;
}
