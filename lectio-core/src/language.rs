//! Language settings as stored by the calling application
//!
//! A settings row carries the signals used to pick a parser (explicit type,
//! the `mecab` sentinel, the split-each-char flag) alongside the regex
//! fragments that become a [`ParserConfig`].

use crate::config::ParserConfig;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Reserved value of the word-character field selecting the MeCab parser
pub const MECAB_SENTINEL: &str = "mecab";

/// One language's settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    #[serde(alias = "LgName")]
    pub name: String,

    /// Explicit parser type; overrides every other signal
    #[serde(alias = "LgParserType", deserialize_with = "empty_as_none")]
    pub parser_type: Option<String>,

    #[serde(alias = "LgRegexpWordCharacters")]
    pub word_characters: String,

    #[serde(alias = "LgRegexpSplitSentences")]
    pub sentence_punctuation: String,

    #[serde(alias = "LgExtraSplit", deserialize_with = "empty_as_none")]
    pub extra_split: Option<String>,

    #[serde(alias = "LgRemovalPattern", deserialize_with = "empty_as_none")]
    pub removal_pattern: Option<String>,

    #[serde(alias = "LgRightToLeft", deserialize_with = "flag")]
    pub right_to_left: bool,

    #[serde(alias = "LgRemoveSpaces", deserialize_with = "flag")]
    pub remove_spaces: bool,

    #[serde(alias = "LgSplitEachChar", deserialize_with = "flag")]
    pub split_each_char: bool,
}

impl LanguageSettings {
    /// Build settings from a raw key-value row.
    ///
    /// Keys are matched case-insensitively, ignoring underscores and a
    /// leading `Lg`, so both `word_characters` and `LgRegexpWordCharacters`
    /// are accepted. Unknown keys are ignored.
    pub fn from_row<K, V>(row: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();

        for (key, value) in row {
            let value = value.as_ref();
            match normalize_key(key.as_ref()).as_str() {
                "name" => settings.name = value.to_string(),
                "parsertype" => settings.parser_type = non_empty(value),
                "regexpwordcharacters" | "wordcharacters" => {
                    settings.word_characters = value.to_string()
                }
                "regexpsplitsentences" | "sentencepunctuation" => {
                    settings.sentence_punctuation = value.to_string()
                }
                "extrasplit" => settings.extra_split = non_empty(value),
                "removalpattern" => settings.removal_pattern = non_empty(value),
                "righttoleft" => settings.right_to_left = parse_flag(value),
                "removespaces" => settings.remove_spaces = parse_flag(value),
                "spliteachchar" => settings.split_each_char = parse_flag(value),
                _ => {}
            }
        }

        settings
    }

    /// Read settings from a TOML language file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether the word-character field holds the MeCab sentinel
    pub fn uses_mecab_sentinel(&self) -> bool {
        self.word_characters
            .trim()
            .eq_ignore_ascii_case(MECAB_SENTINEL)
    }

    /// Build the validated parser configuration for these settings
    pub fn to_parser_config(&self) -> ConfigResult<ParserConfig> {
        let mut builder = ParserConfig::builder()
            .language(self.name.clone())
            .word_characters(self.word_characters.clone())
            .sentence_punctuation(self.sentence_punctuation.clone())
            .right_to_left(self.right_to_left)
            .remove_spaces(self.remove_spaces)
            .split_each_char(self.split_each_char);

        if let Some(extra) = &self.extra_split {
            builder = builder.extra_split(extra.clone());
        }
        if let Some(pattern) = &self.removal_pattern {
            builder = builder.removal_pattern(pattern.clone());
        }

        builder.build()
    }
}

fn normalize_key(key: &str) -> String {
    let key: String = key
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    match key.strip_prefix("lg") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => key,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(non_empty))
}

/// Accept booleans as well as the `0`/`1` integers and strings found in
/// legacy rows.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Text(s) => parse_flag(&s),
    })
}
