//! Markdown job summary for failed delta checks
//!
//! Written to `$GITHUB_STEP_SUMMARY` so the failure is readable from the
//! Actions check details without digging through logs.

use super::thousands;
use crate::regression::DeltaReport;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

/// Render the summary of a failed delta run
pub fn render_summary(report: &DeltaReport, extensions: &BTreeSet<String>) -> String {
    let mut md = String::new();
    md.push_str("## Code Size Check Failed\n\n");
    md.push_str("> ⚠️ **DO NOT trash the code base!** The goal is maintainability.\n\n");

    if !report.crossed.is_empty() {
        md.push_str(&format!(
            "### {} file(s) crossed the {}-line threshold\n\n",
            report.crossed.len(),
            report.threshold
        ));
        md.push_str("| File | Before | After | Delta |\n");
        md.push_str("|------|-------:|------:|------:|\n");
        for v in &report.crossed {
            let before = v.previous.map_or_else(|| "new".to_string(), thousands);
            md.push_str(&format!(
                "| `{}` | {} | {} | +{} |\n",
                v.path,
                before,
                thousands(v.lines),
                thousands(v.delta())
            ));
        }
        md.push('\n');
    }

    if !report.grew.is_empty() {
        md.push_str(&format!(
            "### {} already-large file(s) grew larger\n\n",
            report.grew.len()
        ));
        md.push_str("| File | Before | After | Delta |\n");
        md.push_str("|------|-------:|------:|------:|\n");
        for v in &report.grew {
            md.push_str(&format!(
                "| `{}` | {} | {} | +{} |\n",
                v.path,
                thousands(v.previous.unwrap_or(0)),
                thousands(v.lines),
                thousands(v.delta())
            ));
        }
        md.push('\n');
    }

    if !report.new_duplicates.is_empty() {
        md.push_str(&format!(
            "### {} new duplicate function name(s)\n\n",
            report.new_duplicates.len()
        ));
        md.push_str("| Function | Files |\n");
        md.push_str("|----------|-------|\n");
        for (name, paths) in &report.new_duplicates {
            let files = paths
                .iter()
                .map(|p| format!("`{p}`"))
                .collect::<Vec<_>>()
                .join(", ");
            md.push_str(&format!("| `{name}` | {files} |\n"));
        }
        md.push('\n');
    }

    md.push_str("<details><summary>How to fix</summary>\n\n");
    md.push_str("- Split large files into smaller, focused modules\n");
    md.push_str("- Extract helpers, types, or constants into separate files\n");
    md.push_str(&format!(
        "- This check compares your PR against `{}`\n",
        report.reference
    ));
    let quoted: Vec<String> = extensions.iter().map(|e| format!("`.{e}`")).collect();
    md.push_str(&format!("- Only code files are checked: {}\n", quoted.join(", ")));
    md.push_str("- Docs, test names, and config files are **not** affected\n");
    md.push_str("\n</details>\n");
    md
}

/// Append the summary to the job summary file
pub fn append_summary(path: &Path, report: &DeltaReport, extensions: &BTreeSet<String>) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open job summary {}", path.display()))?;
    file.write_all(render_summary(report, extensions).as_bytes())
        .with_context(|| format!("Failed to write job summary {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ThresholdViolation, ViolationKind};
    use std::collections::BTreeMap;

    fn report() -> DeltaReport {
        DeltaReport {
            reference: "origin/main".into(),
            threshold: 1000,
            files_scanned: 3,
            crossed: vec![ThresholdViolation {
                path: "src/new.ts".into(),
                lines: 1500,
                previous: None,
                kind: ViolationKind::Crossed,
            }],
            grew: vec![ThresholdViolation {
                path: "src/big.ts".into(),
                lines: 2200,
                previous: Some(2100),
                kind: ViolationKind::Grew,
            }],
            new_duplicates: BTreeMap::from([(
                "parseConfig".to_string(),
                vec!["src/a.ts".to_string(), "src/b.ts".to_string()],
            )]),
        }
    }

    fn extensions() -> BTreeSet<String> {
        ["ts".to_string(), "py".to_string()].into_iter().collect()
    }

    #[test]
    fn test_summary_sections() {
        let md = render_summary(&report(), &extensions());
        assert!(md.starts_with("## Code Size Check Failed"));
        assert!(md.contains("### 1 file(s) crossed the 1000-line threshold"));
        assert!(md.contains("| `src/new.ts` | new | 1,500 | +1,500 |"));
        assert!(md.contains("| `src/big.ts` | 2,100 | 2,200 | +100 |"));
        assert!(md.contains("| `parseConfig` | `src/a.ts`, `src/b.ts` |"));
        assert!(md.contains("against `origin/main`"));
        assert!(md.contains("`.py`, `.ts`"));
    }

    #[test]
    fn test_summary_omits_empty_sections() {
        let mut r = report();
        r.grew.clear();
        r.new_duplicates.clear();
        let md = render_summary(&r, &extensions());
        assert!(!md.contains("grew larger"));
        assert!(!md.contains("duplicate function"));
    }

    #[test]
    fn test_append_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.md");
        std::fs::write(&path, "existing\n").unwrap();
        append_summary(&path, &report(), &extensions()).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing\n## Code Size Check Failed"));
    }
}
