use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::flatten::Separator;
use crate::source::EventKind;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "flatwatch",
    about = "Flatten cluster watch events into greppable JSON lines",
    version,
    after_help = "Event lines go to stdout; diagnostics go to stderr.\n\nDocumentation: https://github.com/scottidler/flatwatch"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to flatwatch.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch a stream of change notifications and emit one line per event
    Watch {
        /// Resource kinds to include, matched against the object's `kind`
        /// field case-insensitively (all kinds if empty)
        kinds: Vec<String>,

        /// Read events from a file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// Event kinds to emit
        #[arg(long, value_enum, value_delimiter = ',', default_values_t = [EventKind::Added, EventKind::Deleted])]
        events: Vec<EventKind>,

        /// Emit raw documents instead of flattened maps
        #[arg(long)]
        no_flatten: bool,

        /// Separator between object-key path segments
        #[arg(long, value_enum)]
        separator: Option<Separator>,

        /// Root prefix for flattened paths
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Flatten a single JSON document
    Flatten {
        /// Read the document from a file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// Separator between object-key path segments
        #[arg(long, value_enum)]
        separator: Option<Separator>,

        /// Root prefix for flattened paths
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}
