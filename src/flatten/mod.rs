//! Schema-agnostic JSON flattening
//!
//! Converts an arbitrarily nested JSON value into a single-level mapping
//! from path strings to string values, so that line-oriented tools (grep,
//! diff, spreadsheets) can consume structurally heterogeneous payloads.

pub mod flattener;
pub mod path;

pub use flattener::{Diagnostic, DiagnosticKind, FlatMap, Flattened, flatten};
pub use path::{FlattenOptions, Separator};
