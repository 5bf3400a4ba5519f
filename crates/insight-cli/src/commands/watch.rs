//! Watch command implementation.
//!
//! Re-scans the input directory on a fixed interval and processes papers
//! that have not been attempted in this session.

use crate::cli::WatchArgs;
use crate::commands::build_pipeline;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use insight_domain::traits::{InsightStore, Summarizer};
use insight_ingestor::{BatchReport, Ingestor};
use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use tokio::time::{interval, Duration};

/// Periodic ingestion over one Ingestor
pub struct Watcher<S, T> {
    ingestor: Ingestor<S, T>,
    seen: HashSet<PathBuf>,
}

impl<S, T> Watcher<S, T>
where
    S: Summarizer,
    T: InsightStore,
{
    /// Create a watcher that has not seen any paper yet
    pub fn new(ingestor: Ingestor<S, T>) -> Self {
        Self {
            ingestor,
            seen: HashSet::new(),
        }
    }

    /// Papers attempted so far, successful or not
    pub fn seen(&self) -> usize {
        self.seen.len()
    }

    /// Scan once and process papers not attempted before
    ///
    /// Failed papers are not retried until the next session.
    pub async fn cycle(&mut self) -> Result<BatchReport> {
        let scan = self.ingestor.scan().await?;

        let fresh: Vec<PathBuf> = scan
            .papers
            .into_iter()
            .filter(|path| !self.seen.contains(path))
            .collect();

        if fresh.is_empty() {
            tracing::debug!("No new papers");
            return Ok(BatchReport::default());
        }

        let report = self.ingestor.process_batch(&fresh).await;
        self.seen.extend(fresh);
        Ok(report)
    }

    /// Run until Ctrl+C, printing a report for every cycle that did work
    pub async fn run(&mut self, every: Duration, formatter: &Formatter) -> Result<()> {
        self.run_until(every, formatter, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until `shutdown` completes
    ///
    /// The shutdown future is polled for the whole run, including while a
    /// cycle is in flight. An interrupted cycle is abandoned and its papers
    /// are not marked as seen.
    pub async fn run_until<F>(&mut self, every: Duration, formatter: &Formatter, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(every);
        tokio::pin!(shutdown);

        tracing::info!("Watch started (interval: {:?})", every);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let outcome = tokio::select! {
                        outcome = self.cycle() => outcome,
                        _ = &mut shutdown => {
                            tracing::info!("Shutdown signal received during a cycle, stopping watch");
                            break;
                        }
                    };

                    match outcome {
                        Ok(report) if report.attempted() > 0 => {
                            println!("{}", formatter.format_report(&report)?);
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::error!("Watch cycle failed: {}", e);
                            println!("{}", formatter.error(&e.to_string()));
                        }
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping watch");
                    break;
                }
            }
        }

        println!(
            "{}",
            formatter.info(&format!("Stopped after {} paper(s)", self.seen.len()))
        );

        Ok(())
    }
}

/// Execute the watch command.
pub async fn execute_watch(args: WatchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    if args.interval == 0 {
        return Err(CliError::InvalidInput(
            "interval must be greater than 0".to_string(),
        ));
    }

    let pipeline = build_pipeline(config)?;
    println!(
        "{}",
        formatter.info(&format!(
            "Watching {} every {}s (Ctrl+C to stop)",
            config.ingestor.input_dir.display(),
            args.interval
        ))
    );

    Watcher::new(pipeline)
        .run(Duration::from_secs(args.interval), formatter)
        .await
}
