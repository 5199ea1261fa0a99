//! Path rendering rules for flattened keys

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Separator placed between object-key segments of a flattened path.
///
/// Array indices and length markers are appended with no separator at all,
/// so `{"a": ["x"]}` under the underscore separator renders as `p_a#` and
/// `p_a0`, never `p_a_0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    Underscore,
    Dot,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Underscore => '_',
            Separator::Dot => '.',
        }
    }
}

/// Per-call flattening configuration.
///
/// Passed explicitly into [`flatten`](super::flatten) — the transform reads
/// no global state.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlattenOptions {
    /// Root prefix every rendered path starts with
    pub prefix: String,
    /// Separator between object-key segments
    pub separator: Separator,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            prefix: "flatwatch".to_string(),
            separator: Separator::default(),
        }
    }
}

impl FlattenOptions {
    pub fn new(prefix: impl Into<String>, separator: Separator) -> Self {
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    /// Path of an object member under `path`
    pub(crate) fn member(&self, path: &str, key: &str) -> String {
        format!("{path}{}{key}", self.separator.as_char())
    }

    /// Path of an array element under `path` (no separator before the index)
    pub(crate) fn element(&self, path: &str, index: usize) -> String {
        format!("{path}{index}")
    }

    /// Synthetic key recording an array's element count
    pub(crate) fn length_marker(&self, path: &str) -> String {
        format!("{path}#")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_underscore() {
        let opts = FlattenOptions::default();
        assert_eq!(opts.member("p", "a"), "p_a");
    }

    #[test]
    fn test_member_dot() {
        let opts = FlattenOptions::new("p", Separator::Dot);
        assert_eq!(opts.member("p", "a"), "p.a");
    }

    #[test]
    fn test_element_has_no_separator() {
        let opts = FlattenOptions::default();
        assert_eq!(opts.element("p_a", 3), "p_a3");
    }

    #[test]
    fn test_length_marker() {
        let opts = FlattenOptions::default();
        assert_eq!(opts.length_marker("p_a"), "p_a#");
    }
}
