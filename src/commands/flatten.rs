//! One-shot flatten command
//!
//! Flattens a single JSON document from a file or stdin and prints the
//! resulting map as one compact line. Useful for inspecting what the watch
//! pipeline would emit for a given payload.

use eyre::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::config::Config;
use crate::flatten::{DiagnosticKind, FlattenOptions, Separator, flatten};

pub fn run(
    input: Option<&Path>,
    separator: Option<Separator>,
    prefix: Option<String>,
    config: &Config,
) -> Result<()> {
    let text = match input {
        Some(path) => {
            let path = Config::expand_path(path);
            fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read document from stdin")?;
            buffer
        }
    };

    let value: Value = serde_json::from_str(&text).context("Input is not valid JSON")?;

    let options = FlattenOptions::new(
        prefix.unwrap_or_else(|| config.flatten.prefix.clone()),
        separator.unwrap_or(config.flatten.separator),
    );

    let result = flatten(&value, &options);
    for diagnostic in &result.diagnostics {
        match diagnostic.kind {
            DiagnosticKind::NullSkipped => log::debug!("{}", diagnostic),
            DiagnosticKind::UnrenderableNumber => log::warn!("{}", diagnostic),
        }
    }

    println!("{}", serde_json::to_string(&result.map)?);

    Ok(())
}
