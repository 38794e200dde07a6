//! Backup manager — full tree snapshot taken before any file is touched.
//!
//! The snapshot is the run's only rollback mechanism: restore from it and
//! re-run. It lives inside the root as `<prefix>_<timestamp>`, which is why
//! both the copy and the tree walker exclude backup-prefixed directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default name prefix for snapshot directories.
pub const DEFAULT_BACKUP_PREFIX: &str = "BACKUP_NAMING_FIX";

/// Directories excluded from the snapshot.
const BACKUP_SKIP_DIRS: &[&str] = &["node_modules", ".git", "logs"];

#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub location: PathBuf,
    pub size_bytes: u64,
}

impl BackupInfo {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

/// Snapshot `root` into `<root>/<prefix>_<timestamp>`.
///
/// A missing source root or any copy failure is fatal; nothing has been
/// mutated at this point, so aborting is lossless.
pub fn create_backup(root: &Path, prefix: &str, timestamp: &str) -> Result<BackupInfo> {
    if !root.exists() {
        return Err(Error::Backup(format!("Path not found: {}", root.display())));
    }

    let location = root.join(format!("{}_{}", prefix, timestamp));
    copy_tree(root, &location, prefix)?;

    let size_bytes = dir_size(&location);

    Ok(BackupInfo {
        location,
        size_bytes,
    })
}

fn copy_tree(src: &Path, dest: &Path, backup_prefix: &str) -> Result<()> {
    fs::create_dir_all(dest)
        .map_err(|e| Error::Backup(format!("create {}: {}", dest.display(), e)))?;

    let entries = fs::read_dir(src)
        .map_err(|e| Error::Backup(format!("read {}: {}", src.display(), e)))?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::Backup(e.to_string()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if path.is_dir() {
            if BACKUP_SKIP_DIRS.contains(&name.as_str()) || name.starts_with(backup_prefix) {
                continue;
            }
            copy_tree(&path, &dest.join(&name), backup_prefix)?;
        } else {
            fs::copy(&path, dest.join(&name))
                .map_err(|e| Error::Backup(format!("copy {}: {}", path.display(), e)))?;
        }
    }

    Ok(())
}

/// Recursive directory size. Unreadable entries are counted as zero.
fn dir_size(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };

    let mut total = 0;
    for entry in entries.flatten() {
        let entry_path = entry.path();
        if entry_path.is_dir() {
            total += dir_size(&entry_path);
        } else if let Ok(meta) = entry.metadata() {
            total += meta.len();
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn snapshot_copies_tree_contents() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("routes")).unwrap();
        fs::write(dir.path().join("server.js"), "app.listen(3000);\n").unwrap();
        fs::write(dir.path().join("routes/movies.js"), "// routes\n").unwrap();

        let info = create_backup(dir.path(), "BACKUP_NAMING_FIX", "20250101_120000").unwrap();

        assert!(info.location.ends_with("BACKUP_NAMING_FIX_20250101_120000"));
        assert_eq!(
            fs::read_to_string(info.location.join("server.js")).unwrap(),
            "app.listen(3000);\n"
        );
        assert_eq!(
            fs::read_to_string(info.location.join("routes/movies.js")).unwrap(),
            "// routes\n"
        );
        assert!(info.size_bytes > 0);
    }

    #[test]
    fn snapshot_excludes_dependency_dirs_and_old_backups() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::create_dir_all(dir.path().join("logs")).unwrap();
        fs::create_dir_all(dir.path().join("BACKUP_NAMING_FIX_20240101_000000")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(dir.path().join("logs/app.log"), "x").unwrap();
        fs::write(dir.path().join("app.js"), "x").unwrap();

        let info = create_backup(dir.path(), "BACKUP_NAMING_FIX", "20250101_120000").unwrap();

        assert!(info.location.join("app.js").exists());
        assert!(!info.location.join("node_modules").exists());
        assert!(!info.location.join("logs").exists());
        assert!(!info
            .location
            .join("BACKUP_NAMING_FIX_20240101_000000")
            .exists());
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = tempdir().unwrap();
        let err = create_backup(
            &dir.path().join("does-not-exist"),
            "BACKUP_NAMING_FIX",
            "20250101_120000",
        )
        .unwrap_err();
        assert_eq!(err.code(), "BACKUP_FAILED");
    }

    #[test]
    fn size_mb_converts_bytes() {
        let info = BackupInfo {
            location: PathBuf::from("/tmp/x"),
            size_bytes: 2 * 1024 * 1024,
        };
        assert!((info.size_mb() - 2.0).abs() < f64::EPSILON);
    }
}
