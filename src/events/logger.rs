//! Append-only event logger
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{SpendwiseError, SpendwiseResult};

use super::entry::EventEntry;

/// Writes event entries to the event log file (JSONL)
pub struct EventLogger {
    log_path: PathBuf,
}

impl EventLogger {
    /// Create a new EventLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an event entry
    pub fn log(&self, entry: &EventEntry) -> SpendwiseResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| SpendwiseError::Io(format!("Failed to open event log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| SpendwiseError::Json(format!("Failed to serialize event: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| SpendwiseError::Io(format!("Failed to write event: {}", e)))?;

        file.flush()
            .map_err(|e| SpendwiseError::Io(format!("Failed to flush event log: {}", e)))?;

        Ok(())
    }

    /// Read all event entries in chronological order
    pub fn read_all(&self) -> SpendwiseResult<Vec<EventEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| SpendwiseError::Io(format!("Failed to open event log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                SpendwiseError::Io(format!(
                    "Failed to read event log line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: EventEntry = serde_json::from_str(&line).map_err(|e| {
                SpendwiseError::Json(format!(
                    "Failed to parse event at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent N entries
    pub fn read_recent(&self, count: usize) -> SpendwiseResult<Vec<EventEntry>> {
        let all = self.read_all()?;
        let skip = all.len().saturating_sub(count);
        Ok(all.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::entry::{EntityKind, EventKind};
    use tempfile::TempDir;

    fn logger() -> (TempDir, EventLogger) {
        let temp_dir = TempDir::new().unwrap();
        let logger = EventLogger::new(temp_dir.path().join("events.log"));
        (temp_dir, logger)
    }

    #[test]
    fn test_log_and_read() {
        let (_tmp, logger) = logger();

        logger
            .log(&EventEntry::new(
                EventKind::Created,
                EntityKind::Expense,
                "guest",
            ))
            .unwrap();
        logger
            .log(&EventEntry::new(
                EventKind::Deleted,
                EntityKind::Expense,
                "guest",
            ))
            .unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EventKind::Created);
        assert_eq!(entries[1].kind, EventKind::Deleted);
    }

    #[test]
    fn test_read_missing_file() {
        let (_tmp, logger) = logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_recent() {
        let (_tmp, logger) = logger();
        for i in 0..5 {
            logger
                .log(
                    &EventEntry::new(EventKind::Created, EntityKind::Expense, "guest")
                        .with_detail(format!("expense {}", i)),
                )
                .unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].detail.as_deref(), Some("expense 4"));
    }
}
