//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paper Insights CLI - Summarize research papers into a markdown digest.
#[derive(Debug, Parser)]
#[command(name = "insights")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings that override the configuration file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// Directory scanned for papers
    #[arg(long, env = "INSIGHTS_INPUT_DIR", global = true)]
    pub input_dir: Option<PathBuf>,

    /// Markdown file insights are appended to
    #[arg(long, env = "INSIGHTS_OUTPUT", global = true)]
    pub output: Option<PathBuf>,

    /// OpenAI-compatible gateway URL (selects the gateway provider)
    #[arg(long, env = "GATEWAY_URL", global = true)]
    pub gateway_url: Option<String>,

    /// Model identifier
    #[arg(long, env = "INSIGHTS_MODEL", global = true)]
    pub model: Option<String>,

    /// Use the offline mock provider
    #[arg(long, global = true)]
    pub mock: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process every paper in the input directory once
    Ingest,

    /// Process a single paper
    Paper(PaperArgs),

    /// Keep processing new papers until Ctrl+C
    Watch(WatchArgs),

    /// Print the insights recorded so far
    Show,

    /// Serve the insights file over HTTP
    Serve(ServeArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the paper command.
#[derive(Debug, Parser)]
pub struct PaperArgs {
    /// Path of the .pdf or .txt file
    pub path: PathBuf,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Seconds between directory scans
    #[arg(short, long, default_value = "60")]
    pub interval: u64,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Port to listen on (overrides the configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
