use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use snakefix::backup::DEFAULT_BACKUP_PREFIX;
use snakefix::patterns::ChangeRecord;
use snakefix::run::{self, RunOptions};
use snakefix::Error;

use crate::commands::CmdResult;

#[derive(Args)]
pub struct ConvertArgs {
    /// Root directory to convert
    #[arg(long, default_value = ".")]
    pub path: String,

    /// File extension to include (repeatable; default: js, jsx)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Name prefix for the backup snapshot directory
    #[arg(long, default_value = DEFAULT_BACKUP_PREFIX)]
    pub backup_prefix: String,

    /// Preview changes without taking a backup or writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip persisting the JSON report
    #[arg(long)]
    pub no_report: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConvertOutput {
    #[serde(rename = "convert")]
    Convert {
        root: String,
        dry_run: bool,
        timestamp: String,
        backup_location: Option<String>,
        files_scanned: usize,
        total_files_modified: usize,
        total_replacements: u64,
        changes_summary: BTreeMap<String, u64>,
        files: Vec<FileSummary>,
        report_path: Option<String>,
    },
}

#[derive(Serialize)]
pub struct FileSummary {
    pub file: String,
    pub changes: Vec<ChangeRecord>,
}

pub fn run(args: ConvertArgs) -> CmdResult<ConvertOutput> {
    let extensions = normalize_extensions(&args.extensions)?;

    let mut options = RunOptions::new(PathBuf::from(&args.path));
    if !extensions.is_empty() {
        options.extensions = extensions;
    }
    options.backup_prefix = args.backup_prefix;
    options.dry_run = args.dry_run;
    options.write_report = !args.no_report;

    let outcome = run::execute(&options)?;

    let files = outcome
        .stats
        .changes_by_file
        .iter()
        .map(|(file, changes)| FileSummary {
            file: file.clone(),
            changes: changes.clone(),
        })
        .collect();

    Ok((
        ConvertOutput::Convert {
            root: args.path,
            dry_run: outcome.dry_run,
            timestamp: outcome.timestamp,
            backup_location: outcome
                .backup
                .as_ref()
                .map(|b| b.location.display().to_string()),
            files_scanned: outcome.stats.files_scanned,
            total_files_modified: outcome.stats.files_modified.len(),
            total_replacements: outcome.stats.total_replacements(),
            changes_summary: outcome.stats.replacements_by_legacy.clone(),
            files,
            report_path: outcome.report_path.map(|p| p.display().to_string()),
        },
        0,
    ))
}

/// Accept extensions with or without a leading dot.
fn normalize_extensions(raw: &[String]) -> snakefix::Result<Vec<String>> {
    let mut extensions = Vec::new();
    for ext in raw {
        let trimmed = ext.trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(Error::invalid_argument(
                "ext",
                format!("Invalid extension '{}'", ext),
            ));
        }
        extensions.push(trimmed.to_string());
    }
    Ok(extensions)
}
