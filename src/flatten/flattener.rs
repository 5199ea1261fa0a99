//! The flattening transform
//!
//! Structural recursion over the decoded JSON value. Each scalar leaf
//! contributes one entry keyed by its rendered path; each array additionally
//! contributes a `path#` length marker. Nulls contribute nothing. The
//! transform is pure: anomalies are returned as diagnostics alongside the
//! map, never logged from inside the recursion, so callers decide whether
//! to log, drop, or escalate.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

use super::path::FlattenOptions;

/// Single-level path-string → string-value mapping.
///
/// Insertion-ordered; serializes in the order entries were produced, which
/// is deterministic because serde_json keeps object members sorted.
pub type FlatMap = IndexMap<String, String>;

/// What went wrong at one location in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A null value was skipped; no key was emitted for it
    NullSkipped,
    /// A number had no f64 reading and could not be rendered
    UnrenderableNumber,
}

/// A structural anomaly encountered while flattening, tagged with the
/// rendered path where it occurred. Never aborts processing of siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::NullSkipped => write!(f, "{}: null value skipped", self.path),
            DiagnosticKind::UnrenderableNumber => {
                write!(f, "{}: number has no finite rendering", self.path)
            }
        }
    }
}

/// Result of one flatten invocation
#[derive(Debug, Clone, Default)]
pub struct Flattened {
    pub map: FlatMap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Flatten `value` into a single-level map rooted at `options.prefix`.
///
/// Pure and stateless: allocates a fresh map and diagnostics list per call,
/// touches nothing outside its stack, and is safe to invoke concurrently.
pub fn flatten(value: &Value, options: &FlattenOptions) -> Flattened {
    let mut out = Flattened::default();
    flatten_value(value, options.prefix.clone(), options, &mut out);
    out
}

fn flatten_value(value: &Value, path: String, options: &FlattenOptions, out: &mut Flattened) {
    match value {
        // Absent value: contributes no key, recorded for the caller
        Value::Null => out.diagnostics.push(Diagnostic {
            path,
            kind: DiagnosticKind::NullSkipped,
        }),
        Value::Bool(b) => {
            let rendered = if *b { "true" } else { "false" };
            out.map.insert(path, rendered.to_string());
        }
        Value::Number(n) => match n.as_f64() {
            // Fixed six fractional digits regardless of original precision
            Some(f) => {
                out.map.insert(path, format!("{f:.6}"));
            }
            None => out.diagnostics.push(Diagnostic {
                path,
                kind: DiagnosticKind::UnrenderableNumber,
            }),
        },
        Value::String(s) => {
            out.map.insert(path, s.clone());
        }
        Value::Array(items) => {
            out.map
                .insert(options.length_marker(&path), items.len().to_string());
            for (index, item) in items.iter().enumerate() {
                flatten_value(item, options.element(&path, index), options, out);
            }
        }
        Value::Object(members) => {
            for (key, child) in members {
                flatten_value(child, options.member(&path, key), options, out);
            }
        }
    }
}
