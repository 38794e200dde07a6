//! Run orchestrator — backup, discover/rewrite, report, summary.
//!
//! Four sequential stages, each a hard gate for the next. Only the backup
//! stage can abort the run; file-level failures are logged and skipped, and
//! report persistence failure is non-fatal. No stage is retried: the engine
//! is idempotent, so the recovery path for a partial run is "restore the
//! snapshot and re-run".

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Local;

use crate::backup::{self, BackupInfo, DEFAULT_BACKUP_PREFIX};
use crate::error::{Error, Result};
use crate::log_status;
use crate::mappings::MappingTable;
use crate::patterns::{self, ChangeRecord};
use crate::report::{self, RunReport};
use crate::rewrite;
use crate::walker::{self, DEFAULT_EXTENSIONS};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub backup_prefix: String,
    /// Preview mode: skip the backup stage and write nothing.
    pub dry_run: bool,
    pub write_report: bool,
}

impl RunOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            backup_prefix: DEFAULT_BACKUP_PREFIX.to_string(),
            dry_run: false,
            write_report: true,
        }
    }
}

/// Run-level accumulator, owned by the orchestrator for the run's lifetime.
#[derive(Debug, Default)]
pub struct RunStats {
    pub files_scanned: usize,
    /// Relative paths of files whose content changed (and, outside dry-run,
    /// were written back successfully).
    pub files_modified: Vec<String>,
    pub changes_by_file: BTreeMap<String, Vec<ChangeRecord>>,
    /// Legacy spelling → total occurrence count across all files.
    pub replacements_by_legacy: BTreeMap<String, u64>,
}

impl RunStats {
    fn fold(&mut self, file: String, changes: Vec<ChangeRecord>, modified: bool) {
        for change in &changes {
            *self
                .replacements_by_legacy
                .entry(change.from.clone())
                .or_insert(0) += change.count as u64;
        }
        if modified {
            self.files_modified.push(file.clone());
            self.changes_by_file.insert(file, changes);
        }
    }

    pub fn total_replacements(&self) -> u64 {
        self.replacements_by_legacy.values().sum()
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub timestamp: String,
    /// Absent in dry-run mode.
    pub backup: Option<BackupInfo>,
    pub stats: RunStats,
    pub report: RunReport,
    /// Where the report landed, when persistence was requested and succeeded.
    pub report_path: Option<PathBuf>,
    pub dry_run: bool,
}

/// Execute a full conversion run with the default mapping table.
pub fn execute(options: &RunOptions) -> Result<RunOutcome> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let table = MappingTable::with_default_mappings();
    let entries = patterns::compile_table(&table)?;

    // Stage 1: backup. Nothing has been touched yet, so aborting is lossless.
    let backup = if options.dry_run {
        if !options.root.exists() {
            return Err(Error::invalid_argument(
                "path",
                format!("Path not found: {}", options.root.display()),
            ));
        }
        None
    } else {
        let info = backup::create_backup(&options.root, &options.backup_prefix, &timestamp)?;
        log_status!(
            "backup",
            "Snapshot created at {} ({:.2} MB)",
            info.location.display(),
            info.size_mb()
        );
        Some(info)
    };

    // Stage 2: discover and rewrite, one file at a time.
    let files = walker::walk_tree(&options.root, &options.extensions, &options.backup_prefix);
    let mut stats = RunStats::default();

    for path in &files {
        stats.files_scanned += 1;

        let outcome = rewrite::rewrite_file(path, &entries, !options.dry_run);
        let relative = path
            .strip_prefix(&options.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let modified = !outcome.changes.is_empty() && (options.dry_run || outcome.written);
        if modified {
            log_status!("convert", "{}", relative);
            for change in &outcome.changes {
                log_status!(
                    "convert",
                    "    {} -> {} ({} occurrences)",
                    change.from,
                    change.to,
                    change.count
                );
            }
        }

        stats.fold(relative, outcome.changes, modified);
    }

    // Stage 3: report. The in-memory aggregate is canonical; a persistence
    // failure only loses the audit artifact.
    let report = RunReport {
        timestamp: timestamp.clone(),
        backup_location: backup
            .as_ref()
            .map(|b| b.location.display().to_string())
            .unwrap_or_default(),
        total_files_modified: stats.files_modified.len(),
        total_replacements: stats.total_replacements(),
        changes_summary: stats.replacements_by_legacy.clone(),
    };

    let report_path = if options.write_report && !options.dry_run {
        match report::persist(&report, &options.root) {
            Ok(path) => Some(path),
            Err(e) => {
                log_status!("report", "Report persistence failed (non-fatal): {}", e);
                None
            }
        }
    } else {
        None
    };

    // Stage 4: summary.
    log_status!(
        "summary",
        "Processed {} files, modified {}",
        stats.files_scanned,
        stats.files_modified.len()
    );
    log_status!("summary", "Total replacements: {}", stats.total_replacements());
    if let Some(info) = &backup {
        log_status!("summary", "Rollback: restore from {}", info.location.display());
    }

    Ok(RunOutcome {
        timestamp,
        backup,
        stats,
        report,
        report_path,
        dry_run: options.dry_run,
    })
}
