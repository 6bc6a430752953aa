//! Project-level configuration support
//!
//! Loads per-project configuration from `codesize.toml` or `.codesizerc.json`
//! in the scan root. Every table and key is optional; anything left out keeps
//! its built-in default.
//!
//! # Configuration Format
//!
//! ```toml
//! # codesize.toml
//!
//! [scan]
//! extensions = ["ts", "tsx", "js"]
//! skip_dirs = ["node_modules", "dist"]
//!
//! [duplicates]
//! function_extensions = ["ts", "tsx"]
//! generic_names = ["main", "init"]
//! test_suffixes = [".test.ts", ".spec.ts"]
//!
//! [packages]
//! nested_roots = ["extensions", "apps"]
//! single_roots = ["ui"]
//! report_roots = ["src", "apps", "extensions", "ui"]
//!
//! [short_files]
//! skip_names = ["index.ts"]
//! skip_suffixes = ["-cli.ts"]
//! ```

use crate::detectors::IndependentPackages;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// File extensions counted by the inventory.
pub const DEFAULT_CODE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", // TypeScript/JavaScript
    "swift", // macOS/iOS
    "kt", "java", // Android
    "py", "sh", // Scripts
];

/// Directory names never descended into.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    "__pycache__",
    ".turbo",
    "out",
    ".worktrees",
    "vendor",
    "Pods",
    "DerivedData",
    ".gradle",
    ".idea",
    "Swabble", // Separate Swift package
    "skills",  // Standalone skill scripts
    ".pi",     // Editor extensions
];

/// Extensions the function-name extractor understands.
pub const DEFAULT_FUNCTION_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// Names so generic they are expected to appear independently in many modules.
///
/// Only exact names belong here. Prefix matching would hide real duplication
/// (`formatDuration`, `stripPrefix`, `parseConfig` are specific enough to flag).
pub const DEFAULT_GENERIC_NAMES: &[&str] = &[
    // Lifecycle / framework plumbing
    "main",
    "init",
    "setup",
    "teardown",
    "cleanup",
    "dispose",
    "destroy",
    "open",
    "close",
    "connect",
    "disconnect",
    "execute",
    "run",
    "start",
    "stop",
    "render",
    "update",
    "refresh",
    "reset",
    "clear",
    "flush",
    // Too-short / too-generic identifiers
    "text",
    "json",
    "pad",
    "mask",
    "digest",
    "confirm",
    "intro",
    "outro",
    "exists",
    "send",
    "receive",
    "listen",
    "log",
    "warn",
    "error",
    "info",
    "help",
    "version",
    "config",
    "configure",
    "describe",
    "test",
    "action",
];

/// Test files may redeclare helper names freely.
pub const DEFAULT_TEST_SUFFIXES: &[&str] = &[".test.ts", ".test.tsx", ".spec.ts"];

/// Barrel exports and stubs that are short on purpose.
pub const DEFAULT_SHORT_SKIP_NAMES: &[&str] = &["index.js", "index.ts", "postinstall.js"];
pub const DEFAULT_SHORT_SKIP_SUFFIXES: &[&str] = &["-cli.ts"];

fn string_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Lower-case an extension and drop a leading dot, so `.TS` and `ts` agree.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

/// Extension of a path, normalized, or `None` when it has none.
pub fn path_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(normalize_extension)
}

/// What the inventory walks and counts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Recognized code-file extensions (case-insensitive)
    pub extensions: BTreeSet<String>,
    /// Directory names pruned during the walk
    pub skip_dirs: BTreeSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: string_set(DEFAULT_CODE_EXTENSIONS),
            skip_dirs: string_set(DEFAULT_SKIP_DIRS),
        }
    }
}

impl ScanConfig {
    /// Whether the inventory counts this file
    pub fn is_code_file(&self, path: &Path) -> bool {
        path_extension(path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Whether a directory with this name is pruned
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.contains(name)
    }

    fn normalize(&mut self) {
        self.extensions = self.extensions.iter().map(|e| normalize_extension(e)).collect();
    }
}

/// Lookup tables for duplicate-function detection
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DuplicatePolicy {
    /// Extensions the extractor reads
    pub function_extensions: BTreeSet<String>,
    /// Names never reported as duplicates
    pub generic_names: BTreeSet<String>,
    /// File-name suffixes whose files contribute no names
    pub test_suffixes: BTreeSet<String>,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        Self {
            function_extensions: string_set(DEFAULT_FUNCTION_EXTENSIONS),
            generic_names: string_set(DEFAULT_GENERIC_NAMES),
            test_suffixes: string_set(DEFAULT_TEST_SUFFIXES),
        }
    }
}

impl DuplicatePolicy {
    pub fn is_generic(&self, name: &str) -> bool {
        self.generic_names.contains(name)
    }

    /// Test files are matched on the file name only
    pub fn is_test_file(&self, file_name: &str) -> bool {
        self.test_suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    fn normalize(&mut self) {
        self.function_extensions = self
            .function_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();
    }
}

/// Files that are short on purpose and never get a short-file warning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShortFilePolicy {
    pub skip_names: BTreeSet<String>,
    pub skip_suffixes: BTreeSet<String>,
}

impl Default for ShortFilePolicy {
    fn default() -> Self {
        Self {
            skip_names: string_set(DEFAULT_SHORT_SKIP_NAMES),
            skip_suffixes: string_set(DEFAULT_SHORT_SKIP_SUFFIXES),
        }
    }
}

impl ShortFilePolicy {
    pub fn is_expected_short(&self, file_name: &str) -> bool {
        self.skip_names.contains(file_name)
            || self
                .skip_suffixes
                .iter()
                .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

/// Project-level configuration loaded from codesize.toml or .codesizerc.json
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Inventory extensions and pruned directories
    pub scan: ScanConfig,

    /// Duplicate-function lookup tables
    pub duplicates: DuplicatePolicy,

    /// Independent-package boundaries
    pub packages: IndependentPackages,

    /// Short-file warning exemptions
    pub short_files: ShortFilePolicy,
}

impl ProjectConfig {
    fn normalized(mut self) -> Self {
        self.scan.normalize();
        self.duplicates.normalize();
        self
    }
}

/// Load project configuration from the scan root.
///
/// Searches for configuration files in this order:
/// 1. `codesize.toml`
/// 2. `.codesizerc.json`
///
/// A file that fails to parse is reported and skipped. Returns the default
/// configuration if nothing usable is found.
pub fn load_project_config(root: &Path) -> ProjectConfig {
    let toml_path = root.join("codesize.toml");
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config.normalized();
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = root.join(".codesizerc.json");
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config.normalized();
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
