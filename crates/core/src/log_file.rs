//! File-backed event log.
//!
//! Two renderings of the same chronological stream: `Text` writes the
//! historical human-readable lines, `Jsonl` writes one serde-serialized
//! event per line for tooling. Every record is flushed immediately so the
//! log is complete up to the last event even if the process dies.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::TravelEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Jsonl,
}

pub struct EventLogWriter {
    writer: BufWriter<File>,
    format: LogFormat,
}

impl EventLogWriter {
    /// Create (or truncate) the log file, creating parent directories.
    pub fn create(path: &Path, format: LogFormat) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { writer: BufWriter::new(file), format })
    }

    /// Append one event and flush immediately.
    pub fn append(&mut self, event: &TravelEvent) -> io::Result<()> {
        match self.format {
            LogFormat::Text => writeln!(self.writer, "{event}")?,
            LogFormat::Jsonl => {
                let json = serde_json::to_string(event).map_err(io::Error::other)?;
                writeln!(self.writer, "{json}")?;
            }
        }
        self.writer.flush()
    }

    /// Write a whole event stream in order.
    pub fn append_all(&mut self, events: &[TravelEvent]) -> io::Result<()> {
        for event in events {
            self.append(event)?;
        }
        Ok(())
    }
}
