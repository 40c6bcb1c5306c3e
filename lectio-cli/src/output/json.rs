//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use lectio_core::Token;
use serde::Serialize;
use std::io::Write;

/// Buffers every sentence and writes one JSON array on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    sentences: Vec<SentenceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct SentenceData {
    /// Concatenated token text
    pub text: String,
    pub word_count: usize,
    pub tokens: Vec<Token>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, tokens: &[Token]) -> Result<()> {
        self.sentences.push(SentenceData {
            text: tokens.iter().map(Token::text).collect(),
            word_count: tokens.iter().filter(|t| t.is_word()).count(),
            tokens: tokens.to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
