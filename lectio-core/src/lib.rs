//! Text segmentation engine for foreign-language reading
//!
//! Turns a raw text plus a per-language configuration into an ordered
//! stream of word and non-word tokens grouped into sentences. Three kinds of
//! strategy sit behind the [`Parser`] trait:
//!
//! - [`RegexParser`]: word and sentence boundaries from character classes
//! - [`CharacterParser`]: one token per code point, for unspaced scripts
//! - [`ExternalParser`] / [`MecabParser`]: delegation to a morphological
//!   analyzer run as a subprocess
//!
//! [`ParserRegistry`] holds the strategies and resolves which one a
//! language uses.
//!
//! # Example
//!
//! ```rust
//! use lectio_core::{LanguageSettings, ParserRegistry};
//!
//! let settings = LanguageSettings {
//!     name: "English".to_string(),
//!     word_characters: "a-zA-Z".to_string(),
//!     sentence_punctuation: ".!?".to_string(),
//!     ..Default::default()
//! };
//!
//! let registry = ParserRegistry::new();
//! let parser = registry.resolve(&settings).unwrap();
//! let config = settings.to_parser_config().unwrap();
//!
//! let result = parser.parse("hello world. bye!", &config).unwrap();
//! assert_eq!(result.sentence_count(), 2);
//! assert_eq!(result.word_count(), 3);
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod language;
pub mod parser;
pub mod process;
pub mod registry;
pub mod token;

pub use config::{ParserConfig, ParserConfigBuilder};
pub use error::{ConfigError, ConfigResult, ParseError};
pub use external::{ExternalParserConfig, ExternalParserLoader, InputMode, OutputFormat};
pub use language::{LanguageSettings, MECAB_SENTINEL};
pub use parser::{
    CharacterParser, ExternalParser, MecabParser, Parser, RegexParser, CHARACTER_PARSER,
    MECAB_PARSER, REGEX_PARSER,
};
pub use registry::{ParserInfo, ParserRegistry};
pub use token::{ParseResult, ParseResultBuilder, Token};
