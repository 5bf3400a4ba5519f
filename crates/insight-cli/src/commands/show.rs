//! Show command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use insight_domain::traits::InsightStore;
use insight_store::{MarkdownStore, StoreError};

/// Execute the show command.
pub async fn execute_show(config: &Config, formatter: &Formatter) -> Result<()> {
    let store = MarkdownStore::new(config.ingestor.output_path.clone());

    let records = match store.read_all().await {
        Ok(records) => records,
        Err(StoreError::NotFound(path)) => {
            println!(
                "{}",
                formatter.warning(&format!("No insights file at {} yet. Run 'insights ingest' first.", path))
            );
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", formatter.format_records(&records)?);

    Ok(())
}
