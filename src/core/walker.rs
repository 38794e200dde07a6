//! Tree walker — enumerates candidate text files under a root.

use std::fs;
use std::path::{Path, PathBuf};

/// File extensions converted when no override is given.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx"];

/// Dependency and VCS directories skipped at any depth.
pub const SKIP_DIRS: &[&str] = &["node_modules", ".git"];

/// Collect every file under `root` whose extension is in `extensions`,
/// skipping dependency/VCS directories and any directory whose name starts
/// with `backup_prefix` (the snapshot lives inside the root, so the walker
/// must never descend into it).
///
/// Entries are visited in sorted order so runs are deterministic.
pub fn walk_tree(root: &Path, extensions: &[String], backup_prefix: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_recursive(root, extensions, backup_prefix, &mut files);
    files
}

fn walk_recursive(dir: &Path, extensions: &[String], backup_prefix: &str, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if SKIP_DIRS.contains(&name.as_str()) || name.starts_with(backup_prefix) {
                continue;
            }
            walk_recursive(&path, extensions, backup_prefix, files);
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if extensions.iter().any(|wanted| wanted == ext) {
                files.push(path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn exts() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn finds_matching_extensions_recursively() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("routes")).unwrap();
        fs::write(dir.path().join("server.js"), "").unwrap();
        fs::write(dir.path().join("routes/movies.jsx"), "").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();

        let files = walk_tree(dir.path(), &exts(), "BACKUP_NAMING_FIX");
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| {
            let ext = f.extension().unwrap().to_str().unwrap();
            ext == "js" || ext == "jsx"
        }));
    }

    #[test]
    fn skips_dependency_and_vcs_dirs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::create_dir_all(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/index.js"), "").unwrap();
        fs::write(dir.path().join(".git/hook.js"), "").unwrap();
        fs::write(dir.path().join("app.js"), "").unwrap();

        let files = walk_tree(dir.path(), &exts(), "BACKUP_NAMING_FIX");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn skips_backup_prefixed_dirs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("BACKUP_NAMING_FIX_20250101_000000")).unwrap();
        fs::write(
            dir.path().join("BACKUP_NAMING_FIX_20250101_000000/old.js"),
            "",
        )
        .unwrap();
        fs::write(dir.path().join("current.js"), "").unwrap();

        let files = walk_tree(dir.path(), &exts(), "BACKUP_NAMING_FIX");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("current.js"));
    }

    #[test]
    fn missing_root_yields_empty_list() {
        let dir = tempdir().unwrap();
        let files = walk_tree(&dir.path().join("nope"), &exts(), "BACKUP_NAMING_FIX");
        assert!(files.is_empty());
    }

    #[test]
    fn results_are_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();
        fs::write(dir.path().join("c.js"), "").unwrap();

        let files = walk_tree(dir.path(), &exts(), "BACKUP_NAMING_FIX");
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.js", "b.js", "c.js"]);
    }
}
