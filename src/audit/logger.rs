//! Append-only audit log
//!
//! One JSON object per line. The file and its directory are created on the
//! first write; a missing file reads as an empty history.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{BillcoverError, BillcoverResult};

use super::entry::AuditEntry;

/// Writes and reads the editor's audit trail
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry
    pub fn log(&self, entry: &AuditEntry) -> BillcoverResult<()> {
        if let Some(dir) = self.log_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        file.write_all(&line)?;
        Ok(())
    }

    /// Every entry, oldest first
    ///
    /// A line that is not a valid entry fails the whole read with its
    /// 1-based line number.
    pub fn read_all(&self) -> BillcoverResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        BufReader::new(File::open(&self.log_path)?)
            .lines()
            .enumerate()
            .filter(|(_, line)| !matches!(line, Ok(l) if l.trim().is_empty()))
            .map(|(idx, line)| {
                let line = line?;
                serde_json::from_str::<AuditEntry>(&line).map_err(|e| {
                    BillcoverError::Json(format!("audit log line {}: {}", idx + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> BillcoverResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }
}
