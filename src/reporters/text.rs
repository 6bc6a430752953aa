//! Text (terminal) reporter with colors and formatting

use super::{extension_list, thousands};
use crate::overview::{ListedFile, Overview};
use crate::models::FunctionLocations;
use crate::regression::DeltaReport;
use console::style;
use std::collections::BTreeSet;

const RULE_WIDTH: usize = 60;

/// Section markers, with plain fallbacks for `--no-emoji`
#[derive(Debug, Clone, Copy)]
pub struct Icons {
    pub scan: &'static str,
    pub compare: &'static str,
    pub top: &'static str,
    pub bottom: &'static str,
    pub summary: &'static str,
    pub package: &'static str,
    pub warn: &'static str,
    pub ok: &'static str,
    pub fail: &'static str,
    /// Suffix on flagged listing rows
    pub flag: &'static str,
}

impl Icons {
    pub fn new(no_emoji: bool) -> Self {
        if no_emoji {
            Self {
                scan: "",
                compare: "",
                top: "",
                bottom: "",
                summary: "",
                package: "",
                warn: "[!] ",
                ok: "[ok] ",
                fail: "[x] ",
                flag: " [!]",
            }
        } else {
            Self {
                scan: "📂 ",
                compare: "🔍 ",
                top: "📊 ",
                bottom: "📉 ",
                summary: "📈 ",
                package: "📦 ",
                warn: "⚠️  ",
                ok: "✅ ",
                fail: "❌ ",
                flag: " ⚠️",
            }
        }
    }
}

/// Header printed before any scanning work
pub fn render_header(root: &str, reference: Option<&str>, icons: &Icons) -> String {
    let mut out = format!("\n{}Scanning: {}\n", icons.scan, style(root).bold());
    if let Some(reference) = reference {
        out.push_str(&format!(
            "{}Comparing to: {}\n",
            icons.compare,
            style(reference).yellow()
        ));
    }
    out
}

fn push_listing(out: &mut String, rows: &[ListedFile], icons: &Icons) {
    out.push_str(&format!("{:>8}  File\n", "Lines"));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for f in rows {
        let marker = if f.flagged { icons.flag } else { "" };
        out.push_str(&format!("{:>8}  {}{}\n", f.lines, f.path, marker));
    }
}

fn push_warning(out: &mut String, icons: &Icons, message: String) {
    out.push_str(&format!("{}{}\n", icons.warn, style(message).yellow()));
}

fn push_locations(out: &mut String, name: &str, paths: &[String], bullet: &str) {
    out.push_str(&format!("   {}{}:\n", bullet, style(name).cyan()));
    for path in paths {
        out.push_str(&format!("       {path}\n"));
    }
}

/// Full report: listings, summary, package breakdown and warnings
pub fn render_overview(overview: &Overview, icons: &Icons) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}{}\n\n",
        icons.top,
        style(format!("Top {} longest code files:", overview.longest.len())).bold()
    ));
    push_listing(&mut out, &overview.longest, icons);

    out.push_str(&format!(
        "\n{}{}\n\n",
        icons.bottom,
        style(format!("Bottom {} shortest code files:", overview.shortest.len())).bold()
    ));
    push_listing(&mut out, &overview.shortest, icons);

    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!("\n{}{}\n", icons.summary, style("Summary:").bold()));
    out.push_str(&format!("   Total code files: {}\n", thousands(overview.total_files)));
    out.push_str(&format!("   Total lines: {}\n", thousands(overview.total_lines)));
    out.push_str(&format!("   Average lines/file: {}\n", thousands(overview.average_lines)));

    out.push_str(&format!(
        "\n{}{}\n\n",
        icons.package,
        style("Per-package breakdown:").bold()
    ));
    out.push_str(&format!("{:<15} {:>8} {:>10} {:>8}\n", "Package", "Files", "Lines", "Avg"));
    out.push_str(&"-".repeat(45));
    out.push('\n');
    for p in &overview.packages {
        out.push_str(&format!(
            "{:<15} {:>8} {:>10} {:>8}\n",
            p.name,
            thousands(p.files),
            thousands(p.lines),
            thousands(p.average())
        ));
    }

    let long: Vec<_> = overview.long_files().collect();
    out.push('\n');
    if long.is_empty() {
        out.push_str(&format!("{}No files exceed {} lines\n", icons.ok, overview.threshold));
    } else {
        push_warning(
            &mut out,
            icons,
            format!(
                "Warning: {} file(s) exceed {} lines (consider refactoring):",
                long.len(),
                overview.threshold
            ),
        );
        for f in long {
            out.push_str(&format!("   - {} ({} lines)\n", f.path, thousands(f.lines)));
        }
    }

    let short: Vec<_> = overview.short_files().collect();
    out.push('\n');
    if short.is_empty() {
        out.push_str(&format!(
            "{}No files are {} lines or less\n",
            icons.ok, overview.min_threshold
        ));
    } else {
        push_warning(
            &mut out,
            icons,
            format!(
                "Warning: {} file(s) are {} lines or less (check if needed):",
                short.len(),
                overview.min_threshold
            ),
        );
        for f in short {
            out.push_str(&format!("   - {} ({} lines)\n", f.path, f.lines));
        }
    }

    out.push('\n');
    if overview.duplicates.is_empty() {
        out.push_str(&format!("{}No duplicate function names\n", icons.ok));
    } else {
        push_warning(
            &mut out,
            icons,
            format!(
                "Warning: {} function name(s) appear in multiple files (consider renaming):",
                overview.duplicates.len()
            ),
        );
        for (name, paths) in &overview.duplicates {
            push_locations(&mut out, name, paths, "- ");
        }
    }

    out
}

fn push_duplicates(out: &mut String, duplicates: &FunctionLocations) {
    for (name, paths) in duplicates {
        push_locations(out, name, paths, "");
    }
}

/// Delta report body: crossed, grew and new duplicates
pub fn render_delta(report: &DeltaReport, icons: &Icons) -> String {
    let mut out = String::new();
    let threshold = report.threshold;

    if report.crossed.is_empty() {
        out.push_str(&format!("{}No files crossed {} line threshold\n", icons.ok, threshold));
    } else {
        push_warning(
            &mut out,
            icons,
            format!("{} file(s) crossed {} line threshold:", report.crossed.len(), threshold),
        );
        out.push('\n');
        for v in &report.crossed {
            match v.previous {
                None => out.push_str(&format!(
                    "   {}: {} lines (new file)\n",
                    v.path,
                    thousands(v.lines)
                )),
                Some(before) => out.push_str(&format!(
                    "   {}: {} → {} lines (+{})\n",
                    v.path,
                    thousands(before),
                    thousands(v.lines),
                    thousands(v.delta())
                )),
            }
        }
        out.push('\n');
    }

    if report.grew.is_empty() {
        out.push_str(&format!("{}No already-large files grew\n", icons.ok));
    } else {
        push_warning(
            &mut out,
            icons,
            format!("{} already-large file(s) grew larger:", report.grew.len()),
        );
        out.push('\n');
        for v in &report.grew {
            out.push_str(&format!(
                "   {}: {} → {} lines (+{})\n",
                v.path,
                thousands(v.previous.unwrap_or(0)),
                thousands(v.lines),
                thousands(v.delta())
            ));
        }
        out.push('\n');
    }

    if report.new_duplicates.is_empty() {
        out.push_str(&format!("{}No new duplicate function names\n", icons.ok));
    } else {
        push_warning(
            &mut out,
            icons,
            format!("{} new duplicate function name(s):", report.new_duplicates.len()),
        );
        out.push('\n');
        push_duplicates(&mut out, &report.new_duplicates);
        out.push('\n');
    }

    out
}

/// Actionable footer for a failed strict delta run
pub fn render_failure_footer(
    report: &DeltaReport,
    extensions: &BTreeSet<String>,
    icons: &Icons,
) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut out = format!("{rule}\n");
    out.push_str(&format!(
        "{}{}\n\n",
        icons.fail,
        style("Code size check failed").red().bold()
    ));
    out.push_str(&format!("   {}DO NOT just trash the code base!\n", icons.warn));
    out.push_str("   The goal is maintainability.\n\n");
    if !report.crossed.is_empty() {
        out.push_str(&format!(
            "   {} file(s) grew past the {}-line limit.\n",
            report.crossed.len(),
            report.threshold
        ));
    }
    if !report.grew.is_empty() {
        out.push_str(&format!(
            "   {} file(s) already over {} lines got larger.\n",
            report.grew.len(),
            report.threshold
        ));
    }
    if !report.new_duplicates.is_empty() {
        out.push_str(&format!(
            "   {} function name(s) are newly duplicated.\n",
            report.new_duplicates.len()
        ));
    }
    out.push('\n');
    out.push_str("   How to fix:\n");
    out.push_str("   • Split large files into smaller, focused modules\n");
    out.push_str("   • Extract helpers, types, or constants into separate files\n");
    out.push_str("   • Rename or centralize functions declared in several files\n");
    out.push('\n');
    out.push_str(&format!(
        "   This check compares your PR against {}.\n",
        report.reference
    ));
    out.push_str(&format!(
        "   Only code files are checked ({}).\n",
        extension_list(extensions)
    ));
    out.push_str("   Docs, test names, and config files are not affected.\n");
    out.push_str(&rule);
    out.push('\n');
    out
}

/// Banner for a passing strict delta run
pub fn render_pass_banner(icons: &Icons) -> String {
    format!(
        "{rule}\n{}{}\n{rule}\n",
        icons.ok,
        style("Code size check passed, no files exceed thresholds.").green(),
        rule = "─".repeat(RULE_WIDTH)
    )
}
