//! Parsing strategies
//!
//! Every strategy turns a text plus a [`ParserConfig`] into a
//! [`ParseResult`]. Strategies are stateless apart from cached
//! availability, so one instance can serve concurrent callers.

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::token::{ParseResult, ParseResultBuilder};

mod character;
mod external;
mod mecab;
mod regex;

pub use self::character::CharacterParser;
pub use self::external::ExternalParser;
pub use self::mecab::MecabParser;
pub use self::regex::RegexParser;

/// Type key of the regex strategy
pub const REGEX_PARSER: &str = "regex";
/// Type key of the per-character strategy
pub const CHARACTER_PARSER: &str = "character";
/// Type key of the built-in MeCab strategy
pub const MECAB_PARSER: &str = "mecab";

/// Strategy for splitting text into sentences and tokens
pub trait Parser: Send + Sync {
    /// Unique key used for lookup and resolution
    fn parser_type(&self) -> &str;

    /// Human-readable label
    fn name(&self) -> &str;

    /// Whether the strategy can run. Always true unless it wraps a binary.
    fn is_available(&self) -> bool {
        true
    }

    /// Diagnostic for an unavailable strategy; empty when available
    fn availability_message(&self) -> &str {
        ""
    }

    /// Parse `text`.
    ///
    /// Empty or whitespace-only text yields an empty result. The only error
    /// is [`ParseError::Unavailable`].
    fn parse(&self, text: &str, config: &ParserConfig) -> Result<ParseResult, ParseError>;
}

/// Split normalized text into sentence spans.
///
/// A sentence ends after a run of sentence punctuation or at a newline.
/// Whitespace between sentences is not part of any span.
pub(crate) fn sentence_spans<'a>(text: &'a str, config: &ParserConfig) -> Vec<&'a str> {
    let mut spans = Vec::new();

    for line in text.split('\n') {
        let mut start = 0;
        if let Some(end_re) = config.sentence_end() {
            for m in end_re.find_iter(line) {
                push_trimmed(&mut spans, &line[start..m.end()]);
                start = m.end();
            }
        }
        push_trimmed(&mut spans, &line[start..]);
    }

    spans
}

fn push_trimmed<'a>(spans: &mut Vec<&'a str>, span: &'a str) {
    let span = span.trim();
    if !span.is_empty() {
        spans.push(span);
    }
}

/// Emit word runs and the non-word runs between them
pub(crate) fn push_word_runs(span: &str, config: &ParserConfig, builder: &mut ParseResultBuilder) {
    let mut last = 0;
    for m in config.word_run().find_iter(span) {
        builder.push_non_word(&span[last..m.start()]);
        builder.push_word(m.as_str());
        last = m.end();
    }
    builder.push_non_word(&span[last..]);
}

/// Finish a result, carrying the writing direction over from the config
pub(crate) fn finish(builder: ParseResultBuilder, config: &ParserConfig) -> ParseResult {
    let mut result = builder.finish();
    result.set_right_to_left(config.is_right_to_left());
    result
}
