//! Segmentation delegated to an operator-configured binary

use super::{finish, push_word_runs, Parser};
use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::external::{ExternalParserConfig, OutputFormat};
use crate::process::{Availability, AvailabilityCache, ToolInvocation};
use crate::token::{ParseResult, ParseResultBuilder, Token};

/// Runs the configured tool and decodes its output.
///
/// The tool decides where tokens and sentences split; whether a token is a
/// word is still decided by the language's word-character class.
#[derive(Debug)]
pub struct ExternalParser {
    config: ExternalParserConfig,
    availability: AvailabilityCache,
}

impl ExternalParser {
    pub fn new(config: ExternalParserConfig) -> Self {
        Self {
            config,
            availability: AvailabilityCache::new(),
        }
    }

    pub fn config(&self) -> &ExternalParserConfig {
        &self.config
    }

    fn availability(&self) -> &Availability {
        self.availability.get_or_probe(self.config.binary())
    }

    fn decode(&self, output: &str, config: &ParserConfig) -> ParseResult {
        let mut builder = ParseResultBuilder::new();
        match self.config.output_format() {
            OutputFormat::Line => decode_lines(output, config, &mut builder),
            OutputFormat::Wakati => decode_wakati(output, config, &mut builder),
        }
        finish(builder, config)
    }
}

impl Parser for ExternalParser {
    fn parser_type(&self) -> &str {
        self.config.parser_type()
    }

    fn name(&self) -> &str {
        self.config.name()
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
            binary: self.config.binary(),
            args: self.config.args(),
            input_mode: self.config.input_mode(),
            timeout: self.config.timeout(),
        };

        Ok(run_tool(self, invocation, &text)?
            .map(|output| self.decode(&output, config))
            .unwrap_or_default())
    }
}

/// Check availability, then run the tool.
///
/// `Ok(None)` means the tool failed in a recoverable way; the failure has
/// been logged and the caller should return an empty result.
pub(crate) fn run_tool(
    parser: &dyn Parser,
    invocation: ToolInvocation<'_>,
    text: &str,
) -> Result<Option<String>, ParseError> {
    if !parser.is_available() {
        return Err(ParseError::Unavailable {
            parser: parser.parser_type().to_string(),
            message: parser.availability_message().to_string(),
        });
    }

    match invocation.run(text) {
        Ok(output) => Ok(Some(output)),
        Err(e) => {
            log::warn!("Parser '{}' failed: {e}", parser.parser_type());
            Ok(None)
        }
    }
}

/// One token run per non-blank line. A blank line, or a line made only of
/// sentence punctuation, closes the sentence; consecutive lines otherwise
/// stay in the same sentence.
fn decode_lines(output: &str, config: &ParserConfig, builder: &mut ParseResultBuilder) {
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            builder.end_sentence();
            continue;
        }

        push_word_runs(line, config, builder);
        if config.is_sentence_punctuation(line) {
            builder.end_sentence();
        }
    }
}

/// Whitespace-separated tokens, each classified as a whole. A token made
/// only of sentence punctuation closes the sentence.
fn decode_wakati(output: &str, config: &ParserConfig, builder: &mut ParseResultBuilder) {
    for piece in output.split_whitespace() {
        builder.push(Token::new(piece, config.is_word(piece)));
        if config.is_sentence_punctuation(piece) {
            builder.end_sentence();
        }
    }
}
