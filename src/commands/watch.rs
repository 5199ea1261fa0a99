//! Watch command
//!
//! Streams change notifications from stdin (or a file), filters them by
//! event kind and resource kind, and emits one JSON line per accepted event
//! on stdout.

use eyre::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::flatten::{FlattenOptions, Separator};
use crate::sink::EventSink;
use crate::source::{EventKind, EventReader};

pub fn run(
    kinds: &[String],
    input: Option<&Path>,
    events: &[EventKind],
    no_flatten: bool,
    separator: Option<Separator>,
    prefix: Option<String>,
    config: &Config,
) -> Result<()> {
    let options = FlattenOptions::new(
        prefix.unwrap_or_else(|| config.flatten.prefix.clone()),
        separator.unwrap_or(config.flatten.separator),
    );
    let flatten_enabled = !no_flatten && config.flatten.enabled;

    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let path = Config::expand_path(path);
            Box::new(BufReader::new(
                File::open(&path).context(format!("Failed to open {}", path.display()))?,
            ))
        }
        None => Box::new(io::stdin().lock()),
    };

    let kind_filter: Vec<String> = kinds.iter().map(|k| k.to_ascii_lowercase()).collect();

    log::info!(
        "Watching for events (kinds: {}, events: {:?}, flatten: {})",
        if kind_filter.is_empty() { "all".to_string() } else { kind_filter.join(",") },
        events,
        flatten_enabled
    );

    let mut source = EventReader::new(reader);
    let mut sink = EventSink::new(io::stdout().lock(), flatten_enabled, options);

    while let Some(event) = source.next_event()? {
        if !events.contains(&event.kind) {
            log::debug!("Dropping {} event", event.kind);
            continue;
        }
        if !kind_filter.is_empty() && !matches_kind(&event.object, &kind_filter) {
            continue;
        }
        sink.write_event(&event.object)?;
    }

    Ok(())
}

/// Case-insensitive match of the object's `kind` field against the filter.
/// Objects without a string `kind` never match a non-empty filter.
fn matches_kind(object: &Value, filter: &[String]) -> bool {
    object
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| filter.contains(&kind.to_ascii_lowercase()))
}
