//! Built-in MeCab strategy for Japanese
//!
//! MeCab is asked for one node per line as `surface TAB char-type TAB
//! pos-id TAB reading TAB pos`, with `EOS` after each input line.
//!
//! A node is a word unless its part of speech is a symbol or whitespace
//! class. Nodes printed without a part of speech fall back to their
//! character type, and nodes with neither count as words.

use super::external::run_tool;
use super::{finish, Parser, MECAB_PARSER};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::external::InputMode;
use crate::process::{Availability, AvailabilityCache, ToolInvocation, DEFAULT_TIMEOUT};
use crate::token::{ParseResult, ParseResultBuilder, Token};
use std::time::Duration;

const EOS: &str = "EOS";

/// Top-level parts of speech that never count as words
const NON_WORD_POS: [&str; 3] = ["記号", "補助記号", "空白"];

/// MeCab character types (char.def) that never count as words when no part
/// of speech was printed: SPACE and SYMBOL
const NON_WORD_CHAR_TYPES: [u8; 2] = [1, 3];

/// Runs the `mecab` binary and classifies nodes by part of speech
#[derive(Debug)]
pub struct MecabParser {
    binary: String,
    args: Vec<String>,
    timeout: Duration,
    availability: AvailabilityCache,
}

impl Default for MecabParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MecabParser {
    /// Parser using `mecab` from `PATH`
    pub fn new() -> Self {
        Self::with_binary("mecab")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: vec![
                "-F".to_string(),
                "%m\\t%t\\t%h\\t%f[7]\\t%f[0]\\n".to_string(),
                "-U".to_string(),
                "%m\\t%t\\t%h\\t*\\t%f[0]\\n".to_string(),
                "-E".to_string(),
                format!("{EOS}\\n"),
            ],
            timeout: DEFAULT_TIMEOUT,
            availability: AvailabilityCache::new(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn availability(&self) -> &Availability {
        self.availability.get_or_probe(&self.binary)
    }
}

impl Parser for MecabParser {
    fn parser_type(&self) -> &str {
        MECAB_PARSER
    }

    fn name(&self) -> &str {
        "MeCab (Japanese)"
    }

    fn is_available(&self) -> bool {
        self.availability().available
    }

    fn availability_message(&self) -> &str {
        &self.availability().message
    }

    fn parse(&self, text: &str, config: &ParserConfig) -> Result<ParseResult, ParseError> {
        let text = config.normalize(text);
        if text.trim().is_empty() {
            return Ok(ParseResult::empty());
        }

        let invocation = ToolInvocation {
            binary: &self.binary,
            args: &self.args,
            input_mode: InputMode::Stdin,
            timeout: self.timeout,
        };

        let mut input = text.into_owned();
        if !input.ends_with('\n') {
            input.push('\n');
        }

        Ok(run_tool(self, invocation, &input)?
            .map(|output| decode_nodes(&output, config))
            .unwrap_or_default())
    }
}

fn decode_nodes(output: &str, config: &ParserConfig) -> ParseResult {
    let mut builder = ParseResultBuilder::new();

    for line in output.lines() {
        if line.trim() == EOS {
            builder.end_sentence();
            continue;
        }

        let mut fields = line.split('\t');
        let surface = fields.next().unwrap_or_default();
        if surface.is_empty() {
            continue;
        }

        let char_type = fields.next().and_then(|t| t.trim().parse::<u8>().ok());
        let reading = fields
            .nth(1)
            .map(str::trim)
            .filter(|r| !r.is_empty() && *r != "*");
        let pos = fields.next().map(str::trim).filter(|p| !p.is_empty());

        let is_word = match pos {
            Some(pos) => !NON_WORD_POS.contains(&pos),
            None => !char_type.is_some_and(|t| NON_WORD_CHAR_TYPES.contains(&t)),
        };

        let mut token = Token::new(surface, is_word);
        if let Some(reading) = reading {
            token = token.with_reading(reading);
        }
        builder.push(token);

        if config.is_sentence_punctuation(surface) {
            builder.end_sentence();
        }
    }

    finish(builder, config)
}
