//! Configuration module for codesize
//!
//! This module handles:
//! - Project-level configuration (codesize.toml)
//! - Recognized extensions and pruned directories
//! - Duplicate-detection lookup tables
//! - Package boundaries and short-file exemptions

mod project_config;

pub use project_config::{
    load_project_config,
    normalize_extension,
    path_extension,
    DuplicatePolicy,
    ProjectConfig,
    ScanConfig,
    ShortFilePolicy,
};
