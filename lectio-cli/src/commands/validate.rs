//! Validate command implementation

use super::parser_loader;
use crate::error::CliError;
use crate::input::FileReader;
use anyhow::{Context, Result};
use clap::Args;
use lectio_core::{ExternalParserConfig, LanguageSettings, ParserRegistry};
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Debug, Args)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .multiple(true)
        .args(["parsers_config", "language_config"])
))]
pub struct ValidateArgs {
    /// External parser configuration file to validate
    #[arg(long, value_name = "FILE")]
    pub parsers_config: Option<PathBuf>,

    /// Language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        if let Some(path) = &self.parsers_config {
            validate_parsers(path)?;
        }
        if let Some(path) = &self.language_config {
            validate_language(path, self.parsers_config.as_deref())?;
        }
        Ok(())
    }
}

/// Check every `[parsers.<type>]` entry and fail if any would be skipped
fn validate_parsers(path: &Path) -> Result<()> {
    println!("Validating parser configuration: {}", path.display());

    let content = FileReader::read_text(path)?;
    let mut document: toml::Table = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let entries = match document.remove("parsers") {
        None => toml::Table::new(),
        Some(toml::Value::Table(entries)) => entries,
        Some(other) => {
            return Err(CliError::ValidationFailed(format!(
                "'parsers' is a {}, expected a table",
                other.type_str()
            ))
            .into())
        }
    };

    let mut skipped = 0;
    for (key, entry) in &entries {
        if ParserRegistry::is_reserved_type(key) {
            skipped += 1;
            println!("  ✗ {key}: built-in strategy cannot be replaced");
            continue;
        }
        match ExternalParserConfig::from_entry(key, entry) {
            Ok(config) => println!("  ✓ {key}: {} ({})", config.name(), config.binary()),
            Err(reason) => {
                skipped += 1;
                println!("  ✗ {key}: {reason}");
            }
        }
    }

    println!(
        "{} entr{} loaded, {skipped} skipped",
        entries.len() - skipped,
        if entries.len() - skipped == 1 { "y" } else { "ies" }
    );

    if skipped > 0 {
        return Err(CliError::ValidationFailed(format!(
            "{skipped} invalid parser entr{}",
            if skipped == 1 { "y" } else { "ies" }
        ))
        .into());
    }
    Ok(())
}

/// Build the parser configuration and report the resolved strategy
fn validate_language(path: &Path, parsers_config: Option<&Path>) -> Result<()> {
    println!("Validating language configuration: {}", path.display());

    let settings = LanguageSettings::from_file(path)
        .map_err(|e| CliError::ValidationFailed(e.to_string()))?;

    match settings.to_parser_config() {
        Ok(_) => {
            let registry = ParserRegistry::with_loader(&parser_loader(parsers_config));
            let parser_type = registry.resolve_parser_type(&settings);

            println!("✓ Configuration is valid!");
            if !settings.name.is_empty() {
                println!("  Language name: {}", settings.name);
            }
            println!("  Parser type: {parser_type}");
            match registry.get(&parser_type) {
                Some(parser) if parser.is_available() => {}
                Some(parser) => println!("  Warning: {}", parser.availability_message()),
                None => println!("  Warning: parser '{parser_type}' is not registered"),
            }
            Ok(())
        }
        Err(e) => {
            println!("✗ Configuration is invalid!");
            println!("  Error: {e}");
            Err(CliError::ValidationFailed(e.to_string()).into())
        }
    }
}
