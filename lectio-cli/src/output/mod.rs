//! Output formatting module

use anyhow::Result;
use lectio_core::Token;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Write one sentence worth of tokens
    fn format_sentence(&mut self, tokens: &[Token]) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;
pub mod tokens;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use tokens::TokensFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One sentence per line, words in brackets
    Text,
    /// JSON array of sentences with their tokens
    Json,
    /// One tab-separated `W`/`N` token per line
    Tokens,
}

impl OutputFormat {
    pub fn create_formatter<W>(self, writer: W) -> Box<dyn OutputFormatter>
    where
        W: Write + Send + Sync + 'static,
    {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Tokens => Box::new(TokensFormatter::new(writer)),
        }
    }
}
