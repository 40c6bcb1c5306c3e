//! Per-character segmentation for unspaced scripts

use super::{finish, sentence_spans, Parser, CHARACTER_PARSER};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::token::{ParseResult, ParseResultBuilder, Token};

/// Every code point is its own token. Sentences still follow the
/// punctuation class.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharacterParser;

impl CharacterParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for CharacterParser {
    fn parser_type(&self) -> &str {
        CHARACTER_PARSER
    }

    fn name(&self) -> &str {
        "Split Each Character"
    }

    fn parse(&self, text: &str, config: &ParserConfig) -> Result<ParseResult, ParseError> {
        let text = config.normalize(text);
        let mut builder = ParseResultBuilder::new();
        let mut buf = [0u8; 4];

        for span in sentence_spans(&text, config) {
            for ch in span.chars() {
                let s: &str = ch.encode_utf8(&mut buf);
                builder.push(Token::new(s, config.is_word(s)));
            }
            builder.end_sentence();
        }

        Ok(finish(builder, config))
    }
}
