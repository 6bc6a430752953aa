//! Full-repository report

use super::{Cli, EXIT_VIOLATIONS};
use anyhow::{Context, Result};
use codesize::config::load_project_config;
use codesize::inventory::find_code_files;
use codesize::overview::build_overview;
use codesize::reporters::text::{self, Icons};
use codesize::reporters::{json, OutputFormat};
use std::process::ExitCode;
use tracing::info;

pub(super) fn run(cli: &Cli, format: OutputFormat) -> Result<ExitCode> {
    let root = cli
        .directory
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", cli.directory.display()))?;
    let icons = Icons::new(cli.no_emoji);

    if format == OutputFormat::Text {
        print!("{}", text::render_header(&root.display().to_string(), None, &icons));
    }

    let config = load_project_config(&root);
    let files = find_code_files(&root, &config.scan);
    info!("Scanned {} code files under {}", files.len(), root.display());

    let overview = build_overview(&files, &config, cli.overview_options());
    match format {
        OutputFormat::Text => print!("{}", text::render_overview(&overview, &icons)),
        OutputFormat::Json => println!("{}", json::render_overview(&overview)?),
    }

    if cli.strict && overview.has_long_files() {
        return Ok(ExitCode::from(EXIT_VIOLATIONS));
    }
    Ok(ExitCode::SUCCESS)
}
