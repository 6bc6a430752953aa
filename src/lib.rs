//! Codesize library
//!
//! File inventory, function-name extraction, duplicate detection and the
//! regression analyzers behind the `codesize` binary.

pub mod config;
pub mod detectors;
pub mod git;
pub mod inventory;
pub mod models;
pub mod overview;
pub mod parsers;
pub mod regression;
pub mod reporters;
