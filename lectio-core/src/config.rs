//! Per-language parser configuration

use crate::error::{ConfigError, ConfigResult};
use regex::Regex;
use std::borrow::Cow;

/// Read-only settings passed into every `parse` call.
///
/// All regex fragments are compiled in [`ParserConfigBuilder::build`], so a
/// malformed fragment is reported here and never while parsing.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    language: String,
    word_characters: String,
    sentence_punctuation: String,
    extra_split: Option<String>,
    removal_pattern: Option<String>,
    right_to_left: bool,
    remove_spaces: bool,
    split_each_char: bool,

    word_run: Regex,
    word_full: Regex,
    sentence_end: Option<Regex>,
    sentence_full: Option<Regex>,
    removal: Option<Regex>,
}

impl ParserConfig {
    /// Create a configuration builder
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Word-character class fragment, without brackets
    pub fn word_characters(&self) -> &str {
        &self.word_characters
    }

    /// Sentence-punctuation class fragment, without brackets
    pub fn sentence_punctuation(&self) -> &str {
        &self.sentence_punctuation
    }

    pub fn extra_split(&self) -> Option<&str> {
        self.extra_split.as_deref()
    }

    pub fn removal_pattern(&self) -> Option<&str> {
        self.removal_pattern.as_deref()
    }

    pub fn is_right_to_left(&self) -> bool {
        self.right_to_left
    }

    pub fn remove_spaces(&self) -> bool {
        self.remove_spaces
    }

    pub fn split_each_char(&self) -> bool {
        self.split_each_char
    }

    /// Regex matching one maximal run of word characters
    pub(crate) fn word_run(&self) -> &Regex {
        &self.word_run
    }

    /// Whether `text` consists only of word characters
    pub fn is_word(&self, text: &str) -> bool {
        self.word_full.is_match(text)
    }

    /// Whether `text` consists only of sentence punctuation
    pub fn is_sentence_punctuation(&self, text: &str) -> bool {
        self.sentence_full
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }

    /// Regex matching a run of sentence-terminating punctuation, if any is configured
    pub(crate) fn sentence_end(&self) -> Option<&Regex> {
        self.sentence_end.as_ref()
    }

    /// Apply line-ending normalization, the removal pattern and space removal
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(text);

        if out.contains('\r') {
            out = Cow::Owned(out.replace("\r\n", "\n").replace('\r', "\n"));
        }

        if let Some(re) = &self.removal {
            if re.is_match(&out) {
                out = Cow::Owned(re.replace_all(&out, "").into_owned());
            }
        }

        if self.remove_spaces && out.chars().any(|c| c.is_whitespace() && c != '\n') {
            out = Cow::Owned(
                out.chars()
                    .filter(|&c| c == '\n' || !c.is_whitespace())
                    .collect(),
            );
        }

        out
    }
}

/// Fluent builder for [`ParserConfig`]
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    language: Option<String>,
    word_characters: Option<String>,
    sentence_punctuation: Option<String>,
    extra_split: Option<String>,
    removal_pattern: Option<String>,
    right_to_left: bool,
    remove_spaces: bool,
    split_each_char: bool,
}

impl ParserConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Language identifier (free-form, used for logging and display)
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Character-class fragment for word characters, e.g. `a-zA-Z`
    pub fn word_characters(mut self, class: impl Into<String>) -> Self {
        self.word_characters = Some(class.into());
        self
    }

    /// Character-class fragment for sentence terminators, e.g. `.!?`
    pub fn sentence_punctuation(mut self, class: impl Into<String>) -> Self {
        self.sentence_punctuation = Some(class.into());
        self
    }

    /// Literal characters that also end a sentence
    pub fn extra_split(mut self, chars: impl Into<String>) -> Self {
        self.extra_split = Some(chars.into());
        self
    }

    /// Regex whose matches are deleted before tokenizing
    pub fn removal_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.removal_pattern = Some(pattern.into());
        self
    }

    pub fn right_to_left(mut self, enabled: bool) -> Self {
        self.right_to_left = enabled;
        self
    }

    pub fn remove_spaces(mut self, enabled: bool) -> Self {
        self.remove_spaces = enabled;
        self
    }

    pub fn split_each_char(mut self, enabled: bool) -> Self {
        self.split_each_char = enabled;
        self
    }

    /// Compile all fragments and build the configuration
    pub fn build(self) -> ConfigResult<ParserConfig> {
        let word_characters = self
            .word_characters
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingField("word_characters"))?;

        let word_run = compile("word_characters", &word_characters, |c| format!("[{c}]+"))?;
        let word_full = compile("word_characters", &word_characters, |c| format!("^[{c}]+$"))?;

        let sentence_punctuation = self.sentence_punctuation.unwrap_or_default();
        let extra_split = self.extra_split.filter(|s| !s.is_empty());

        let mut class = sentence_punctuation.clone();
        if let Some(extra) = &extra_split {
            for ch in extra.chars() {
                class.push_str(&regex::escape(ch.encode_utf8(&mut [0; 4])));
            }
        }

        let (sentence_end, sentence_full) = if class.is_empty() {
            (None, None)
        } else {
            (
                Some(compile("sentence_punctuation", &class, |c| format!("[{c}]+"))?),
                Some(compile("sentence_punctuation", &class, |c| format!("^[{c}]+$"))?),
            )
        };

        let removal_pattern = self.removal_pattern.filter(|s| !s.is_empty());
        let removal = removal_pattern
            .as_deref()
            .map(|p| compile("removal_pattern", p, str::to_string))
            .transpose()?;

        Ok(ParserConfig {
            language: self.language.unwrap_or_default(),
            word_characters,
            sentence_punctuation,
            extra_split,
            removal_pattern,
            right_to_left: self.right_to_left,
            remove_spaces: self.remove_spaces,
            split_each_char: self.split_each_char,
            word_run,
            word_full,
            sentence_end,
            sentence_full,
            removal,
        })
    }
}

fn compile(
    field: &'static str,
    fragment: &str,
    wrap: impl Fn(&str) -> String,
) -> ConfigResult<Regex> {
    Regex::new(&wrap(fragment)).map_err(|source| ConfigError::InvalidPattern {
        field,
        pattern: fragment.to_string(),
        source,
    })
}
