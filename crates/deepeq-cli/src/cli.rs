use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "deepeq",
    about = "deepeq: structural diffs between JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log comparison diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two JSON documents
    Diff(DiffArgs),
    /// Show the effective comparison configuration
    Config(ConfigArgs),
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Clone, Debug, Default)]
pub struct Overrides {
    /// Stop after this many differences
    #[arg(long)]
    pub max_diffs: Option<usize>,
    /// Deepest nesting level compared (0 = unlimited)
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Decimal digits floats are rounded to
    #[arg(long)]
    pub float_precision: Option<u16>,
    /// TOML file with comparison settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub left: PathBuf,
    pub right: PathBuf,
    #[command(flatten)]
    pub overrides: Overrides,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: Overrides,
}
