//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use insight_domain::InsightRecord;
use insight_ingestor::BatchReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format insight records.
    pub fn format_records(&self, records: &[InsightRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Table => Ok(self.format_records_table(records)),
        }
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[InsightRecord]) -> String {
        if records.is_empty() {
            return self.colorize("No insights found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Title", "Authors", "Source", "Key insights"]);

        for (idx, record) in records.iter().enumerate() {
            let insights = record
                .insights
                .iter()
                .map(|insight| format!("- {}", insight))
                .collect::<Vec<_>>()
                .join("\n");
            builder.push_record([
                (idx + 1).to_string(),
                record.meta.title.clone(),
                record.meta.authors_line(),
                record.meta.source.clone(),
                insights,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a batch report.
    pub fn format_report(&self, report: &BatchReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            let json = serde_json::json!({
                "processed": report.processed.iter().map(|r| &r.meta.source).collect::<Vec<_>>(),
                "failed": report.failed.iter().map(|f| serde_json::json!({
                    "file": f.path.display().to_string(),
                    "error": f.error,
                })).collect::<Vec<_>>(),
                "skipped": report.skipped.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            });
            return Ok(serde_json::to_string_pretty(&json)?);
        }

        let mut lines = Vec::new();
        for record in &report.processed {
            lines.push(self.record_appended(record));
        }
        for failed in &report.failed {
            lines.push(self.error(&format!("{}: {}", failed.path.display(), failed.error)));
        }

        let summary = format!(
            "{} processed, {} failed, {} skipped",
            report.processed.len(),
            report.failed.len(),
            report.skipped.len()
        );
        lines.push(if report.is_success() {
            self.success(&summary)
        } else {
            self.warning(&summary)
        });

        Ok(lines.join("\n"))
    }

    /// Format a single appended record.
    pub fn record_appended(&self, record: &InsightRecord) -> String {
        self.success(&format!(
            "{} ({}): {} insight(s)",
            record.meta.title,
            record.meta.source,
            record.insight_count()
        ))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
