//! Ingest and paper command implementations.

use crate::cli::PaperArgs;
use crate::commands::build_pipeline;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the ingest command.
pub async fn execute_ingest(config: &Config, formatter: &Formatter) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let report = pipeline.process_once().await?;

    if report.attempted() == 0 && formatter.format() == OutputFormat::Table {
        println!(
            "{}",
            formatter.info(&format!(
                "No papers found in {}",
                config.ingestor.input_dir.display()
            ))
        );
    }
    println!("{}", formatter.format_report(&report)?);

    Ok(())
}

/// Execute the paper command.
pub async fn execute_paper(args: PaperArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let pipeline = build_pipeline(config)?;
    let record = pipeline.process_paper(&args.path).await?;

    match formatter.format() {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Table => println!("{}", formatter.record_appended(&record)),
    }

    Ok(())
}
