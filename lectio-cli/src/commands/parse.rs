//! Parse command implementation

use super::parser_loader;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use lectio_core::external::PARSERS_CONFIG_ENV;
use lectio_core::{LanguageSettings, ParseError, ParserRegistry};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Arguments for the parse command
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Language configuration file (TOML)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub language_config: PathBuf,

    /// Parser type to use instead of the one the language resolves to
    #[arg(short, long, value_name = "TYPE")]
    pub parser: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// External parser configuration file
    #[arg(long, value_name = "FILE", env = PARSERS_CONFIG_ENV)]
    pub parsers_config: Option<PathBuf>,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self) -> Result<()> {
        log::debug!("Arguments: {self:?}");

        let settings = LanguageSettings::from_file(&self.language_config).with_context(|| {
            format!(
                "Failed to load language configuration: {}",
                self.language_config.display()
            )
        })?;
        let config = settings
            .to_parser_config()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let loader = parser_loader(self.parsers_config.as_deref());
        let registry = ParserRegistry::with_loader(&loader);

        let parser_type = match &self.parser {
            Some(explicit) => explicit.trim().to_string(),
            None => registry.resolve_parser_type(&settings),
        };
        let parser = registry
            .get(&parser_type)
            .ok_or_else(|| CliError::UnknownParser(parser_type.clone()))?;

        if !parser.is_available() {
            return Err(ParseError::Unavailable {
                parser: parser_type,
                message: parser.availability_message().to_string(),
            }
            .into());
        }

        let files = resolve_patterns(&self.input)?;
        log::info!(
            "Parsing {} file(s) with '{}' ({})",
            files.len(),
            parser.parser_type(),
            parser.name()
        );

        let mut formatter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                self.format.create_formatter(BufWriter::new(file))
            }
            None => self.format.create_formatter(io::stdout()),
        };

        for path in &files {
            let text = FileReader::read_text(path)?;
            let result = parser
                .parse(&text, &config)
                .with_context(|| format!("Failed to parse {}", path.display()))?;

            log::info!(
                "{}: {} sentence(s), {} word(s)",
                path.display(),
                result.sentence_count(),
                result.word_count()
            );

            for sentence in result.sentences() {
                formatter.format_sentence(sentence)?;
            }
        }

        formatter.finish()
    }
}
