use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "xml-compare")]
#[command(about = "Check whether two XML documents are semantically equivalent")]
pub struct Cli {
    /// Left-hand document, or `-` for stdin.
    pub lhs: PathBuf,
    /// Right-hand document, or `-` for stdin.
    pub rhs: PathBuf,
    /// Collapse whitespace runs and trim text before comparing it.
    #[arg(long)]
    pub normalize_whitespace: bool,
    /// Treat sibling elements as an unordered set.
    #[arg(long)]
    pub ignore_order: bool,
    /// Treat a missing document as equal to an empty one.
    #[arg(long)]
    pub equate_nil_and_empty: bool,
    /// Treat a path that does not exist as a missing document.
    #[arg(long)]
    pub missing_as_nil: bool,
    /// Maximum nesting depth to walk; 0 disables the limit.
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// TOML file with a `[compare]` table of default options.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Print a one-line summary instead of the full report.
    #[arg(long)]
    pub summary: bool,
    /// Print nothing; report through the exit status only.
    #[arg(short, long)]
    pub quiet: bool,
    /// Raise log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
