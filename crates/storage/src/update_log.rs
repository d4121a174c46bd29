// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only build log: one serialized recorded update per line.
//!
//! The log is the persistence boundary. Generated updates are refused
//! here, so a replay has to derive them again from the recorded ones.

use kevin_core::{Clock, ReconstructionError, SystemClock, Update, UpdateError};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Update(#[from] UpdateError),
    #[error("refusing to record generated update {0}")]
    Generated(&'static str),
    #[error("line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: ReconstructionError,
    },
}

/// Destination for serialized recorded updates.
pub trait UpdateSink {
    fn write(&mut self, line: &str) -> Result<(), LogError>;
}

/// A recorded update read back from a log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// 1-based position among the log's updates.
    pub seq: u64,
    pub update: Update,
}

/// Append-only JSONL file of a single build.
pub struct UpdateLog {
    path: PathBuf,
    writer: BufWriter<File>,
    write_seq: u64,
}

impl UpdateLog {
    /// Open or create the log at `path`. Existing entries are counted so
    /// sequence numbers continue where the previous writer stopped.
    pub fn open(path: &Path) -> Result<Self, LogError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let write_seq = if path.exists() { count_entries(path)? } else { 0 };
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing::debug!(path = %path.display(), entries = write_seq, "opened update log");
        Ok(Self { path: path.to_path_buf(), writer: BufWriter::new(file), write_seq })
    }

    /// Append a recorded update, returning its sequence number.
    pub fn append(&mut self, update: &Update) -> Result<u64, LogError> {
        if update.is_generated() {
            tracing::warn!(update = %update.log_summary(), "generated update refused by the log");
            return Err(LogError::Generated(update.tag()));
        }
        let line = update.serialize()?;
        self.write(&line)?;
        tracing::debug!(seq = self.write_seq, tag = update.tag(), "appended update");
        Ok(self.write_seq)
    }

    pub fn flush(&mut self) -> Result<(), LogError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_seq(&self) -> u64 {
        self.write_seq
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UpdateSink for UpdateLog {
    fn write(&mut self, line: &str) -> Result<(), LogError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.write_seq += 1;
        Ok(())
    }
}

impl Drop for UpdateLog {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to flush update log");
        }
    }
}

fn count_entries(path: &Path) -> Result<u64, LogError> {
    let mut count = 0;
    for line in BufReader::new(File::open(path)?).lines() {
        if !line?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}

/// Read every update of the log at `path`, in order.
pub fn read_log(path: &Path) -> Result<Vec<LogEntry>, LogError> {
    read_log_with_clock(path, &SystemClock)
}

/// Like [`read_log`]; entries without a `time` get the clock's time.
///
/// Blank lines are skipped. The first line that cannot be reconstructed
/// aborts the read with its 1-based line number.
pub fn read_log_with_clock(path: &Path, clock: &impl Clock) -> Result<Vec<LogEntry>, LogError> {
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let update = Update::construct_with_clock(&line, clock)
            .map_err(|source| LogError::Corrupt { line: index + 1, source })?;
        entries.push(LogEntry { seq: entries.len() as u64 + 1, update });
    }
    Ok(entries)
}

#[cfg(test)]
#[path = "update_log_tests.rs"]
mod tests;
