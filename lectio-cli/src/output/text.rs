//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use lectio_core::Token;
use std::io::Write;

/// One sentence per line with every word wrapped in brackets
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, tokens: &[Token]) -> Result<()> {
        let mut line = String::new();
        for token in tokens {
            if token.is_word() {
                line.push('[');
                line.push_str(token.text());
                line.push(']');
            } else {
                line.push_str(token.text());
            }
        }
        writeln!(self.writer, "{}", line.trim())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
