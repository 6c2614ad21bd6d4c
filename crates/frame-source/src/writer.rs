//! Append-only writer for composed frame events.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use gestura_common::error::{GesturaError, GesturaResult};
use gestura_gesture_core::FrameConsumer;
use gestura_hand_model::FrameEvent;
use serde::{Deserialize, Serialize};

/// Metadata written as the first line of an event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStreamHeader {
    pub schema_version: String,
    pub epoch_wall: String,
    pub surface: String,
}

impl EventStreamHeader {
    pub fn new(epoch_wall: impl Into<String>, surface: impl Into<String>) -> Self {
        Self {
            schema_version: "1.0".to_string(),
            epoch_wall: epoch_wall.into(),
            surface: surface.into(),
        }
    }
}

/// Writes events to a JSONL file, one per processed frame.
pub struct EventWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    events_written: u64,
}

impl EventWriter {
    /// Create a new event writer, writing the header as the first line.
    pub fn new(path: PathBuf, header: EventStreamHeader) -> GesturaResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| GesturaError::consumer(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            events_written: 0,
        })
    }

    /// Write a single event as a JSONL line.
    pub fn write_event(&mut self, event: &FrameEvent) -> GesturaResult<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| GesturaError::consumer(format!("Failed to write event: {e}")))?;
        self.events_written += 1;

        if self.events_written % 1000 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> GesturaResult<()> {
        self.writer
            .flush()
            .map_err(|e| GesturaError::consumer(format!("Failed to flush events: {e}")))
    }

    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl FrameConsumer for EventWriter {
    fn on_frame(&mut self, event: &FrameEvent) -> GesturaResult<()> {
        self.write_event(event)
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
