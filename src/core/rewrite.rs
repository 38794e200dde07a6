//! File rewriter — applies the full pattern set to a single file.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::log_status;
use crate::patterns::{convert_content, ChangeRecord, ContextPatterns};

/// Result of one file pass.
#[derive(Debug, Default)]
pub struct RewriteOutcome {
    /// Change records accumulated across all entries and rules. Empty when
    /// the file was unreadable or nothing matched.
    pub changes: Vec<ChangeRecord>,
    /// Whether the rewritten content was persisted back to disk.
    pub written: bool,
}

/// Rewrite one file in place.
///
/// An unreadable file (missing, permissions, not valid UTF-8) is treated as
/// having zero changes; it is not retried and nothing is left behind. A
/// write failure is logged and swallowed so the run continues with the next
/// file. With `write_back` false the content is converted in memory only.
pub fn rewrite_file(path: &Path, entries: &[ContextPatterns], write_back: bool) -> RewriteOutcome {
    let Ok(original) = fs::read_to_string(path) else {
        return RewriteOutcome::default();
    };

    let (converted, changes) = convert_content(entries, &original);

    if converted == original {
        return RewriteOutcome::default();
    }

    let mut written = false;
    if write_back {
        match write_file_atomic(path, &converted) {
            Ok(()) => written = true,
            Err(e) => log_status!("convert", "Write failed: {} - {}", path.display(), e),
        }
    }

    RewriteOutcome { changes, written }
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// The rename is atomic on POSIX filesystems, so readers always see either
/// the old content or the new content, never a partial write.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Other(format!("Invalid path: {}", path.display())))?;

    let filename = path
        .file_name()
        .ok_or_else(|| Error::Other(format!("Invalid path: {}", path.display())))?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
