//! Lookup and resolution of parsing strategies

use crate::external::ExternalParserLoader;
use crate::language::LanguageSettings;
use crate::parser::{
    CharacterParser, ExternalParser, MecabParser, Parser, RegexParser, CHARACTER_PARSER,
    MECAB_PARSER, REGEX_PARSER,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Built-in types that configuration may not shadow
const RESERVED_TYPES: [&str; 2] = [REGEX_PARSER, CHARACTER_PARSER];

/// Diagnostic summary of one registered strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParserInfo {
    #[serde(rename = "type")]
    pub parser_type: String,
    pub name: String,
    pub available: bool,
    pub message: String,
}

/// Holds one instance per strategy type
pub struct ParserRegistry {
    parsers: BTreeMap<String, Arc<dyn Parser>>,
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("types", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    /// Registry with the built-in `regex`, `character` and `mecab` strategies
    pub fn new() -> Self {
        let mut registry = Self {
            parsers: BTreeMap::new(),
        };
        registry.register(Arc::new(RegexParser::new()));
        registry.register(Arc::new(CharacterParser::new()));
        registry.register(Arc::new(MecabParser::new()));
        registry
    }

    /// Built-ins plus every parser configured in `loader`
    pub fn with_loader(loader: &ExternalParserLoader) -> Self {
        let mut registry = Self::new();
        registry.register_external(loader);
        registry
    }

    /// Add a strategy, replacing any previous one with the same type
    pub fn register(&mut self, parser: Arc<dyn Parser>) {
        let key = parser.parser_type().to_string();
        if self.parsers.insert(key.clone(), parser).is_some() {
            log::debug!("Replaced parser '{key}'");
        }
    }

    /// Register one [`ExternalParser`] per configured tool.
    ///
    /// Entries named after the in-process `regex` or `character` strategies
    /// are skipped; a configured `mecab` entry replaces the built-in one.
    pub fn register_external(&mut self, loader: &ExternalParserLoader) {
        for config in loader.external_parsers().iter() {
            let parser_type = config.parser_type();
            if Self::is_reserved_type(parser_type) {
                log::warn!(
                    "Ignoring external parser '{parser_type}': the built-in strategy cannot be replaced"
                );
                continue;
            }
            self.register(Arc::new(ExternalParser::new(config.clone())));
        }
    }

    /// Whether `parser_type` names an in-process strategy that configured
    /// tools may not replace
    pub fn is_reserved_type(parser_type: &str) -> bool {
        RESERVED_TYPES.contains(&parser_type)
    }

    pub fn get(&self, parser_type: &str) -> Option<Arc<dyn Parser>> {
        self.parsers.get(parser_type).cloned()
    }

    pub fn has(&self, parser_type: &str) -> bool {
        self.parsers.contains_key(parser_type)
    }

    pub fn default_type(&self) -> &'static str {
        REGEX_PARSER
    }

    /// Registered type keys, sorted
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    /// Strategies whose availability check passes
    pub fn available(&self) -> BTreeMap<String, Arc<dyn Parser>> {
        self.parsers
            .iter()
            .filter(|(_, parser)| parser.is_available())
            .map(|(key, parser)| (key.clone(), Arc::clone(parser)))
            .collect()
    }

    pub fn parser_info(&self) -> BTreeMap<String, ParserInfo> {
        self.parsers
            .iter()
            .map(|(key, parser)| {
                let info = ParserInfo {
                    parser_type: key.clone(),
                    name: parser.name().to_string(),
                    available: parser.is_available(),
                    message: parser.availability_message().to_string(),
                };
                (key.clone(), info)
            })
            .collect()
    }

    /// Pick the parser type for a language.
    ///
    /// Priority: explicit `parser_type`, then the `mecab` sentinel in the
    /// word-character field, then `split_each_char`, then the default.
    pub fn resolve_parser_type(&self, settings: &LanguageSettings) -> String {
        if let Some(explicit) = settings
            .parser_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            return explicit.to_string();
        }

        if settings.uses_mecab_sentinel() {
            return MECAB_PARSER.to_string();
        }

        if settings.split_each_char {
            return CHARACTER_PARSER.to_string();
        }

        self.default_type().to_string()
    }

    /// [`resolve_parser_type`](Self::resolve_parser_type) followed by lookup
    pub fn resolve(&self, settings: &LanguageSettings) -> Option<Arc<dyn Parser>> {
        self.get(&self.resolve_parser_type(settings))
    }
}
