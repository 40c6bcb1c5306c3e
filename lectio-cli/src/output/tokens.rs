//! Token-per-line output formatter

use super::OutputFormatter;
use anyhow::Result;
use lectio_core::Token;
use std::io::Write;

/// `W` or `N`, a tab, then the token text. Sentences are separated by a
/// blank line. Newlines inside token text are escaped as `\n`.
pub struct TokensFormatter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> TokensFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            first: true,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TokensFormatter<W> {
    fn format_sentence(&mut self, tokens: &[Token]) -> Result<()> {
        if !self.first {
            writeln!(self.writer)?;
        }
        self.first = false;

        for token in tokens {
            let kind = if token.is_word() { 'W' } else { 'N' };
            write!(self.writer, "{kind}\t{}", token.text().replace('\n', "\\n"))?;
            if let Some(reading) = token.reading() {
                write!(self.writer, "\t{reading}")?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lines() {
        let mut out = Vec::new();
        {
            let mut formatter = TokensFormatter::new(&mut out);
            formatter
                .format_sentence(&[Token::word("猫").with_reading("ネコ"), Token::non_word("。")])
                .unwrap();
            formatter.format_sentence(&[Token::word("犬")]).unwrap();
            formatter.finish().unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "W\t猫\tネコ\nN\t。\n\nW\t犬\n"
        );
    }
}
