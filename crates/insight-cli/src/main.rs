//! Paper Insights CLI - Summarize research papers into a markdown digest.

use clap::Parser;
use insight_cli::commands;
use insight_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> insight_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config, then layer flags and environment on top
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)?;
    config.apply_overrides(&cli.overrides);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Ingest => commands::execute_ingest(&config, &formatter).await?,
        Command::Paper(args) => commands::execute_paper(args, &config, &formatter).await?,
        Command::Watch(args) => commands::execute_watch(args, &config, &formatter).await?,
        Command::Show => commands::execute_show(&config, &formatter).await?,
        Command::Serve(args) => commands::execute_serve(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter)?
        }
    }

    Ok(())
}
