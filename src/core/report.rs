//! Run report — the persisted audit artifact for one conversion run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::rewrite::write_file_atomic;

/// Prefix for the JSON report written at the root after a run.
pub const REPORT_PREFIX: &str = "NAMING_FIX_REPORT";

/// Aggregate summary of everything a run replaced. Built once at the end of
/// the run and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub timestamp: String,
    pub backup_location: String,
    pub total_files_modified: usize,
    pub total_replacements: u64,
    /// Legacy spelling → occurrence count across the whole run.
    pub changes_summary: BTreeMap<String, u64>,
}

pub fn report_filename(timestamp: &str) -> String {
    format!("{}_{}.json", REPORT_PREFIX, timestamp)
}

/// Persist the report as pretty-printed JSON at the root.
///
/// The in-memory aggregate is the canonical result; callers treat a
/// persistence failure as non-fatal.
pub fn persist(report: &RunReport, root: &Path) -> Result<PathBuf> {
    let path = root.join(report_filename(&report.timestamp));
    let payload = serde_json::to_string_pretty(report)?;
    write_file_atomic(&path, &payload)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_report() -> RunReport {
        let mut changes_summary = BTreeMap::new();
        changes_summary.insert("movieId".to_string(), 4);
        changes_summary.insert("releaseDate".to_string(), 2);
        RunReport {
            timestamp: "20250101_120000".to_string(),
            backup_location: "/srv/app/BACKUP_NAMING_FIX_20250101_120000".to_string(),
            total_files_modified: 3,
            total_replacements: 6,
            changes_summary,
        }
    }

    #[test]
    fn persist_writes_schema_fields() {
        let dir = tempdir().unwrap();
        let path = persist(&sample_report(), dir.path()).unwrap();

        assert!(path.ends_with("NAMING_FIX_REPORT_20250101_120000.json"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["timestamp"], "20250101_120000");
        assert_eq!(value["total_files_modified"], 3);
        assert_eq!(value["total_replacements"], 6);
        assert_eq!(value["changes_summary"]["movieId"], 4);
        assert_eq!(value["changes_summary"]["releaseDate"], 2);
        assert!(value["backup_location"]
            .as_str()
            .unwrap()
            .contains("BACKUP_NAMING_FIX"));
    }

    #[test]
    fn persist_fails_for_missing_root() {
        let dir = tempdir().unwrap();
        let result = persist(&sample_report(), &dir.path().join("gone"));
        assert!(result.is_err());
    }
}
