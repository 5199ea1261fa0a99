//! Event sink: one compact JSON line per event
//!
//! Owns the output side of the pipeline. With flattening enabled each
//! event's document is run through the flatten transform and the resulting
//! map is serialized; otherwise the document is re-encoded as-is. A line is
//! produced with a single buffered write and flushed before the next event,
//! so two events' bytes never interleave. Encode failures drop the event
//! and are logged; they never terminate the stream.

use eyre::{Context, Result};
use serde_json::Value;
use std::io::Write;

use crate::flatten::{DiagnosticKind, FlattenOptions, flatten};

pub struct EventSink<W: Write> {
    writer: W,
    flatten_enabled: bool,
    options: FlattenOptions,
}

impl<W: Write> EventSink<W> {
    pub fn new(writer: W, flatten_enabled: bool, options: FlattenOptions) -> Self {
        Self {
            writer,
            flatten_enabled,
            options,
        }
    }

    /// Emit one event document. Returns `Err` only on output I/O failure.
    pub fn write_event(&mut self, object: &Value) -> Result<()> {
        let line = if self.flatten_enabled {
            let result = flatten(object, &self.options);
            for diagnostic in &result.diagnostics {
                match diagnostic.kind {
                    DiagnosticKind::NullSkipped => log::debug!("{}", diagnostic),
                    DiagnosticKind::UnrenderableNumber => log::warn!("{}", diagnostic),
                }
            }
            match serde_json::to_string(&result.map) {
                Ok(line) => line,
                Err(e) => {
                    log::error!("Cannot re-encode flattened event: {}", e);
                    return Ok(());
                }
            }
        } else {
            match serde_json::to_string(object) {
                Ok(line) => line,
                Err(e) => {
                    log::error!("Cannot re-encode event: {}", e);
                    return Ok(());
                }
            }
        };

        writeln!(self.writer, "{}", line).context("Failed to write event line")?;
        self.writer.flush().context("Failed to flush event line")?;
        Ok(())
    }
}
