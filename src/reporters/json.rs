//! JSON reporter
//!
//! Pretty-printed JSON for the full report and for delta runs. Useful for
//! piping to jq in CI.

use crate::overview::Overview;
use crate::regression::DeltaReport;
use anyhow::Result;

/// Render a full report as JSON
pub fn render_overview(overview: &Overview) -> Result<String> {
    Ok(serde_json::to_string_pretty(overview)?)
}

/// Render a delta report as JSON
pub fn render_delta(report: &DeltaReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ThresholdViolation, ViolationKind};
    use std::collections::BTreeMap;

    #[test]
    fn test_delta_json_shape() {
        let report = DeltaReport {
            reference: "origin/main".into(),
            threshold: 1000,
            files_scanned: 2,
            crossed: vec![ThresholdViolation {
                path: "src/a.ts".into(),
                lines: 1200,
                previous: None,
                kind: ViolationKind::Crossed,
            }],
            grew: vec![],
            new_duplicates: BTreeMap::from([(
                "parseConfig".to_string(),
                vec!["src/a.ts".to_string(), "src/b.ts".to_string()],
            )]),
        };

        let json_str = render_delta(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["reference"], "origin/main");
        assert_eq!(parsed["crossed"][0]["kind"], "crossed");
        assert!(parsed["crossed"][0]["previous"].is_null());
        assert_eq!(parsed["new_duplicates"]["parseConfig"][1], "src/b.ts");
    }

    #[test]
    fn test_overview_json_shape() {
        let overview = crate::overview::build_overview(
            &[],
            &crate::config::ProjectConfig::default(),
            crate::overview::OverviewOptions::default(),
        );
        let json_str = render_overview(&overview).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["threshold"], 1000);
        assert_eq!(parsed["total_files"], 0);
        assert!(parsed["longest"].as_array().expect("longest array").is_empty());
    }
}
