//! Function-name extraction
//!
//! Lightweight line-anchored pattern matching, not a parser. Two shapes are
//! recognized in TypeScript sources:
//!
//! ```text
//! export async function name(...)      declared function
//! export const name = (...) =>         arrow function bound to a const
//! ```
//!
//! Both must start at column zero, so indented inner declarations are not
//! picked up. Arrow heads need a parameter list without nested parentheses
//! or a bare identifier; `async` arrows and parameter lists with call
//! defaults are missed.

use crate::config::DuplicatePolicy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

use crate::config::path_extension;

static FUNCTION_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn function_patterns() -> &'static Vec<Regex> {
    FUNCTION_PATTERNS.get_or_init(|| {
        vec![
            // export function name(...) or function name(...)
            Regex::new(r"(?m)^(?:export\s+)?(?:async\s+)?function\s+(\w+)").expect("valid regex"),
            // export const name = (...) => or const name = x =>
            Regex::new(r"(?m)^(?:export\s+)?const\s+(\w+)\s*=\s*(?:\([^)]*\)|\w+)\s*=>")
                .expect("valid regex"),
        ]
    })
}

/// Extract declared function names from source text.
///
/// Each name appears once no matter how often it is declared.
pub fn extract_functions(content: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for pattern in function_patterns() {
        for caps in pattern.captures_iter(content) {
            if let Some(name) = caps.get(1) {
                names.insert(name.as_str().to_string());
            }
        }
    }
    names
}

/// Extracts function names from the file types it understands
#[derive(Debug, Clone)]
pub struct FunctionExtractor {
    extensions: BTreeSet<String>,
}

impl FunctionExtractor {
    pub fn new(extensions: BTreeSet<String>) -> Self {
        Self { extensions }
    }

    pub fn from_policy(policy: &DuplicatePolicy) -> Self {
        Self::new(policy.function_extensions.clone())
    }

    /// Whether files with this path's extension are analyzed
    pub fn handles(&self, path: &Path) -> bool {
        path_extension(path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Names declared in `content`, or nothing when `path` is not a handled type
    pub fn extract(&self, path: &Path, content: &str) -> BTreeSet<String> {
        if !self.handles(path) {
            return BTreeSet::new();
        }
        extract_functions(content)
    }

    /// Read and extract a file on disk. Unreadable files yield no names.
    pub fn extract_file(&self, path: &Path) -> BTreeSet<String> {
        if !self.handles(path) {
            return BTreeSet::new();
        }
        match std::fs::read(path) {
            Ok(bytes) => extract_functions(&String::from_utf8_lossy(&bytes)),
            Err(e) => {
                debug!("Could not read {} for extraction: {}", path.display(), e);
                BTreeSet::new()
            }
        }
    }
}

impl Default for FunctionExtractor {
    fn default() -> Self {
        Self::from_policy(&DuplicatePolicy::default())
    }
}

/// Accumulate `names` declared in `location` into a name → locations mapping,
/// skipping generic names.
pub(crate) fn record_functions(
    locations: &mut BTreeMap<String, Vec<String>>,
    names: BTreeSet<String>,
    location: &str,
    policy: &DuplicatePolicy,
) {
    for name in names {
        if policy.is_generic(&name) {
            continue;
        }
        locations.entry(name).or_default().push(location.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(content: &str) -> Vec<String> {
        extract_functions(content).into_iter().collect()
    }

    #[test]
    fn test_declared_functions() {
        let src = "\
function plain() {}
export function exported(a: string) {}
async function later() {}
export async function both() {}
";
        assert_eq!(names(src), vec!["both", "exported", "later", "plain"]);
    }

    #[test]
    fn test_arrow_functions() {
        let src = "\
const noArgs = () => 1;
export const withArgs = (a: number, b: number) => a + b;
const bare = x => x * 2;
const spaced   =   ( ) =>   0;
";
        assert_eq!(names(src), vec!["bare", "noArgs", "spaced", "withArgs"]);
    }

    #[test]
    fn test_indented_declarations_ignored() {
        let src = "\
class Foo {
  function inner() {}
}
  const nested = () => 1;
export default function () {}
";
        assert!(names(src).is_empty());
    }

    #[test]
    fn test_non_function_consts_ignored() {
        let src = "\
const value = 42;
const obj = { a: 1 };
let mutable = () => 1;
const called = compute();
";
        assert!(names(src).is_empty());
    }

    #[test]
    fn test_arrow_head_limits() {
        let src = "\
const destructured = ({ a, b }) => a;
const typed = async (a: string) => a;
const withDefault = (a = make()) => a;
const wrapped = (
  a: string,
) => a;
";
        assert_eq!(names(src), vec!["destructured", "wrapped"]);
    }

    #[test]
    fn test_duplicate_declarations_counted_once() {
        let src = "function twice() {}\nfunction twice() {}\nconst twice = () => 0;\n";
        assert_eq!(names(src), vec!["twice"]);
    }

    #[test]
    fn test_extractor_respects_extensions() {
        let extractor = FunctionExtractor::default();
        let src = "function parseConfig() {}\n";
        assert_eq!(extractor.extract(Path::new("a.ts"), src).len(), 1);
        assert_eq!(extractor.extract(Path::new("a.TSX"), src).len(), 1);
        assert!(extractor.extract(Path::new("a.js"), src).is_empty());
        assert!(extractor.extract(Path::new("Makefile"), src).is_empty());
    }

    #[test]
    fn test_extract_file_unreadable_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = FunctionExtractor::default();
        assert!(extractor.extract_file(&dir.path().join("missing.ts")).is_empty());

        let path = dir.path().join("real.ts");
        std::fs::write(&path, b"function ok() {}\n\xff\xfe\n").unwrap();
        assert_eq!(
            extractor.extract_file(&path).into_iter().collect::<Vec<_>>(),
            vec!["ok"]
        );
    }
}
