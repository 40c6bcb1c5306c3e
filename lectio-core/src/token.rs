//! Token stream produced by every parser

use serde::Serialize;
use std::ops::Range;

/// One segment of parsed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    text: String,
    is_word: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reading: Option<String>,
}

impl Token {
    /// Create a word token
    pub fn word(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// Create a non-word token (whitespace, punctuation, digits...)
    pub fn non_word(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    pub fn new(text: impl Into<String>, is_word: bool) -> Self {
        Self {
            text: text.into(),
            is_word,
            reading: None,
        }
    }

    /// Attach a pronunciation reported by the analyzer
    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = Some(reading.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_word(&self) -> bool {
        self.is_word
    }

    pub fn reading(&self) -> Option<&str> {
        self.reading.as_deref()
    }
}

/// Aggregate output of one `parse` call.
///
/// Tokens are kept in emission order; sentences are contiguous,
/// non-empty ranges over the token list that cover it exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
    right_to_left: bool,
}

impl ParseResult {
    /// An empty result (no tokens, no sentences)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Word tokens only, in document order
    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_word())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// Tokens of the sentence at `index`
    pub fn sentence(&self, index: usize) -> Option<&[Token]> {
        self.sentences
            .get(index)
            .map(|range| &self.tokens[range.clone()])
    }

    /// Iterate over sentences as token slices
    pub fn sentences(&self) -> impl Iterator<Item = &[Token]> {
        self.sentences
            .iter()
            .map(move |range| &self.tokens[range.clone()])
    }

    /// Text of the sentence at `index`, rebuilt from its tokens
    pub fn sentence_text(&self, index: usize) -> Option<String> {
        self.sentence(index)
            .map(|tokens| tokens.iter().map(Token::text).collect())
    }

    /// Whether the source language is written right to left
    pub fn is_right_to_left(&self) -> bool {
        self.right_to_left
    }

    pub(crate) fn set_right_to_left(&mut self, right_to_left: bool) {
        self.right_to_left = right_to_left;
    }
}

/// Incremental builder used by the parsers.
///
/// Zero-length tokens are dropped and a sentence is only recorded once it
/// holds at least one token, so the result invariants hold by construction.
#[derive(Debug, Default)]
pub struct ParseResultBuilder {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
    sentence_start: usize,
}

impl ParseResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        if !token.text.is_empty() {
            self.tokens.push(token);
        }
    }

    pub fn push_word(&mut self, text: &str) {
        self.push(Token::word(text));
    }

    pub fn push_non_word(&mut self, text: &str) {
        self.push(Token::non_word(text));
    }

    /// Close the current sentence. No-op when it has no tokens yet.
    pub fn end_sentence(&mut self) {
        let end = self.tokens.len();
        if end > self.sentence_start {
            self.sentences.push(self.sentence_start..end);
            self.sentence_start = end;
        }
    }

    /// Whether the open sentence holds any token
    pub fn in_sentence(&self) -> bool {
        self.tokens.len() > self.sentence_start
    }

    pub fn finish(mut self) -> ParseResult {
        self.end_sentence();
        ParseResult {
            tokens: self.tokens,
            sentences: self.sentences,
            right_to_left: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ParseResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.token_count(), 0);
        assert_eq!(result.sentence_count(), 0);
        assert_eq!(result.words().count(), 0);
        assert!(result.sentence(0).is_none());
    }

    #[test]
    fn test_builder_skips_empty_tokens_and_sentences() {
        let mut builder = ParseResultBuilder::new();
        builder.end_sentence();
        builder.push_word("");
        builder.push_word("hello");
        builder.push_non_word("!");
        builder.end_sentence();
        builder.end_sentence();

        let result = builder.finish();
        assert_eq!(result.token_count(), 2);
        assert_eq!(result.sentence_count(), 1);
    }

    #[test]
    fn test_finish_closes_open_sentence() {
        let mut builder = ParseResultBuilder::new();
        builder.push_word("a");
        builder.end_sentence();
        builder.push_word("b");
        assert!(builder.in_sentence());

        let result = builder.finish();
        assert_eq!(result.sentence_count(), 2);
        assert_eq!(result.sentence_text(1).as_deref(), Some("b"));
    }

    #[test]
    fn test_words_preserve_order() {
        let mut builder = ParseResultBuilder::new();
        builder.push_word("one");
        builder.push_non_word(" ");
        builder.push_word("two");
        let result = builder.finish();

        let words: Vec<&str> = result.words().map(Token::text).collect();
        assert_eq!(words, vec!["one", "two"]);
        assert_eq!(result.word_count(), 2);
    }

    #[test]
    fn test_sentences_cover_all_tokens() {
        let mut builder = ParseResultBuilder::new();
        builder.push_word("x");
        builder.push_non_word(".");
        builder.end_sentence();
        builder.push_word("y");
        let result = builder.finish();

        let covered: usize = result.sentences().map(<[Token]>::len).sum();
        assert_eq!(covered, result.token_count());
    }

    #[test]
    fn test_token_reading() {
        let token = Token::word("東京").with_reading("トウキョウ");
        assert_eq!(token.reading(), Some("トウキョウ"));
        assert!(Token::non_word("。").reading().is_none());
    }

    #[test]
    fn test_token_serializes_without_empty_reading() {
        let json = serde_json::to_string(&Token::word("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi","is_word":true}"#);
    }
}
