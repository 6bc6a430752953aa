//! Delta mode: regressions relative to a git ref

use super::{Cli, EXIT_BAD_REF, EXIT_VIOLATIONS};
use anyhow::{Context, Result};
use codesize::config::load_project_config;
use codesize::git::{GitRepo, VersionControl};
use codesize::inventory::find_code_files;
use codesize::regression::analyze_delta;
use codesize::reporters::text::{self, Icons};
use codesize::reporters::{github, json, markdown, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

pub(super) fn run(cli: &Cli, reference: &str, format: OutputFormat) -> Result<ExitCode> {
    let root = cli
        .directory
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", cli.directory.display()))?;
    let icons = Icons::new(cli.no_emoji);

    // Nothing goes to stdout until the ref is known to be usable.
    let repo = match GitRepo::open(&root) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("{}{e}", icons.fail);
            eprintln!("   --compare-to needs the scanned directory to be inside a git repository");
            return Ok(ExitCode::from(EXIT_BAD_REF));
        }
    };
    if !repo.ref_exists(reference) {
        eprintln!("{}Invalid git ref: {reference}", icons.fail);
        eprintln!("   Make sure the ref exists (e.g. run 'git fetch origin <branch>')");
        return Ok(ExitCode::from(EXIT_BAD_REF));
    }

    if format == OutputFormat::Text {
        println!("{}", text::render_header(&root.display().to_string(), Some(reference), &icons));
    }

    let config = load_project_config(&root);
    let files = find_code_files(&root, &config.scan);
    info!("Scanned {} code files under {}", files.len(), root.display());

    let report = analyze_delta(&files, &config, &repo, reference, cli.threshold);
    let failed = cli.strict && report.has_violations();

    match format {
        OutputFormat::Json => println!("{}", json::render_delta(&report)?),
        OutputFormat::Text => {
            println!("{}", text::render_delta(&report, &icons));
            if failed && github::in_github_actions() {
                for line in github::annotations(&report) {
                    println!("{line}");
                }
            }
        }
    }

    if failed {
        let summary_path = std::env::var_os(github::STEP_SUMMARY_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if let Some(path) = summary_path {
            if let Err(e) = markdown::append_summary(&path, &report, &config.scan.extensions) {
                warn!("Failed to write job summary: {e:#}");
            }
        }
        if format == OutputFormat::Text {
            print!("{}", text::render_failure_footer(&report, &config.scan.extensions, &icons));
        }
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    }

    if cli.strict && format == OutputFormat::Text {
        print!("{}", text::render_pass_banner(&icons));
    }
    Ok(ExitCode::SUCCESS)
}
