//! Command implementations

pub mod completions;
pub mod config;
pub mod flatten;
pub mod watch;
