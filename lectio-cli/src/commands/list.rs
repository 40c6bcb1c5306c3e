//! List command implementation

use super::parser_loader;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Args, ValueEnum};
use lectio_core::external::PARSERS_CONFIG_ENV;
use lectio_core::{ParserInfo, ParserRegistry};
use std::io::{self, Write};
use std::path::PathBuf;

/// Arguments for `list parsers`
#[derive(Debug, Args)]
pub struct ListParsersArgs {
    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,

    /// External parser configuration file
    #[arg(long, value_name = "FILE", env = PARSERS_CONFIG_ENV)]
    pub parsers_config: Option<PathBuf>,
}

impl ListParsersArgs {
    pub fn execute(&self) -> Result<()> {
        let loader = parser_loader(self.parsers_config.as_deref());
        let registry = ParserRegistry::with_loader(&loader);
        let parsers: Vec<ParserInfo> = registry.parser_info().into_values().collect();

        let mut out = io::stdout().lock();
        if self.json {
            serde_json::to_writer_pretty(&mut out, &parsers)?;
            writeln!(out)?;
        } else {
            write_table(&mut out, &parsers)?;
        }
        Ok(())
    }
}

fn write_table(out: &mut impl Write, parsers: &[ParserInfo]) -> io::Result<()> {
    writeln!(out, "Registered parsers:")?;
    for info in parsers {
        let status = if info.available {
            "available"
        } else {
            "unavailable"
        };
        writeln!(out, "  {:<12} {:<12} {}", info.parser_type, status, info.name)?;
        if !info.message.is_empty() {
            writeln!(out, "  {:<12} {}", "", info.message)?;
        }
    }
    Ok(())
}

/// Print every supported output format
pub fn list_formats() -> Result<()> {
    println!("Available output formats:");
    for format in OutputFormat::value_variants() {
        if let Some(value) = format.to_possible_value() {
            println!(
                "  {:<8} - {}",
                value.get_name(),
                value.get_help().map(ToString::to_string).unwrap_or_default()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_status_and_message() {
        let parsers = vec![
            ParserInfo {
                parser_type: "mecab".to_string(),
                name: "MeCab (Japanese)".to_string(),
                available: false,
                message: "Binary 'mecab' not found in PATH".to_string(),
            },
            ParserInfo {
                parser_type: "regex".to_string(),
                name: "Regular Expression".to_string(),
                available: true,
                message: String::new(),
            },
        ];

        let mut out = Vec::new();
        write_table(&mut out, &parsers).unwrap();
        let table = String::from_utf8(out).unwrap();

        assert!(table.contains("mecab        unavailable  MeCab (Japanese)"));
        assert!(table.contains("not found in PATH"));
        assert!(table.contains("regex        available    Regular Expression"));
        assert_eq!(table.lines().count(), 4);
    }
}
