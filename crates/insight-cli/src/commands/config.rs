//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Init { force } => init_config(path, force, formatter),
        ConfigAction::Show => show_config(config, path, formatter),
    }
}

/// Write a default configuration file.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote default configuration to {}", path.display()))
    );

    Ok(())
}

/// Print the effective configuration with secrets masked.
fn show_config(config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    let mut shown = config.clone();
    if shown.llm.api_key.is_some() {
        shown.llm.api_key = Some("********".to_string());
    }

    let source = if path.exists() {
        format!("Configuration file: {}", path.display())
    } else {
        format!("Configuration file: {} (not found, using defaults)", path.display())
    };
    println!("{}", formatter.info(&source));
    println!("{}", shown.to_toml()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let formatter = Formatter::new(OutputFormat::Table, false);

        init_config(&path, false, &formatter).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.summarizer.max_insights, 5);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm]\nmodel = \"keep-me\"\n").unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);

        assert!(matches!(
            init_config(&path, false, &formatter),
            Err(CliError::InvalidInput(_))
        ));
        assert!(std::fs::read_to_string(&path).unwrap().contains("keep-me"));

        init_config(&path, true, &formatter).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("keep-me"));
    }
}
