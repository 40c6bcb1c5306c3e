//! Regex-driven segmentation for space-delimited scripts

use super::{finish, push_word_runs, sentence_spans, Parser, REGEX_PARSER};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::token::{ParseResult, ParseResultBuilder};

/// Splits sentences on the punctuation class and words on the
/// word-character class. Each maximal non-word run becomes one token.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexParser;

impl RegexParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for RegexParser {
    fn parser_type(&self) -> &str {
        REGEX_PARSER
    }

    fn name(&self) -> &str {
        "Regular Expression"
    }

    fn parse(&self, text: &str, config: &ParserConfig) -> Result<ParseResult, ParseError> {
        let text = config.normalize(text);
        let mut builder = ParseResultBuilder::new();

        for span in sentence_spans(&text, config) {
            push_word_runs(span, config, &mut builder);
            builder.end_sentence();
        }

        Ok(finish(builder, config))
    }
}
