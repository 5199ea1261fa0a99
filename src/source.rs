//! Event source: decodes a stream of change notifications
//!
//! Reads one JSON document per line from any `BufRead` (the output of a
//! watch relay such as `kubectl get -w -o json | jq -c`). Lines that fail
//! to decode are logged and skipped so one bad document never suppresses
//! the rest of the stream. Both bare resource documents and
//! `{"type": "...", "object": {...}}` watch-event wrappers are accepted.

use clap::ValueEnum;
use eyre::{Context, Result};
use serde_json::Value;
use std::fmt;
use std::io::BufRead;

/// Kind of change notification carried by an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventKind {
    Added,
    Modified,
    Deleted,
    Error,
    Other,
}

impl EventKind {
    /// Map the wire-format `type` field of a watch-event wrapper
    fn from_wire(kind: &str) -> Self {
        match kind.to_ascii_uppercase().as_str() {
            "ADDED" => EventKind::Added,
            "MODIFIED" => EventKind::Modified,
            "DELETED" => EventKind::Deleted,
            "ERROR" => EventKind::Error,
            _ => EventKind::Other,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Added => "added",
            EventKind::Modified => "modified",
            EventKind::Deleted => "deleted",
            EventKind::Error => "error",
            EventKind::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// One change notification: the event kind plus the resource document
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: EventKind,
    pub object: Value,
}

impl Event {
    /// Build an event from one decoded document.
    ///
    /// A document shaped like `{"type": "DELETED", "object": {...}}` is
    /// unwrapped; anything else is treated as an added object in its own
    /// right.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut members)
                if members.get("type").is_some_and(Value::is_string)
                    && members.contains_key("object") =>
            {
                let kind = members
                    .get("type")
                    .and_then(Value::as_str)
                    .map(EventKind::from_wire)
                    .unwrap_or(EventKind::Other);
                let object = members.remove("object").unwrap_or(Value::Null);
                Self { kind, object }
            }
            value => Self {
                kind: EventKind::Added,
                object: value,
            },
        }
    }
}

/// Line-oriented event decoder over any buffered reader
pub struct EventReader<R: BufRead> {
    input: R,
    line: String,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }

    /// Next decodable event, or `None` at end of stream.
    ///
    /// Undecodable lines are logged at warn and skipped; only an I/O
    /// failure on the underlying reader is an error.
    pub fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            self.line.clear();
            let read = self
                .input
                .read_line(&mut self.line)
                .context("Failed to read from event stream")?;
            if read == 0 {
                return Ok(None);
            }

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => return Ok(Some(Event::from_value(value))),
                Err(e) => {
                    log::warn!("Skipping undecodable event document: {}", e);
                }
            }
        }
    }
}
