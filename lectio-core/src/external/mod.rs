//! Operator-configured external segmenters

mod config;
mod loader;

pub use config::{ExternalParserConfig, InputMode, OutputFormat};
pub use loader::{
    default_config_path, validate_entries, ExternalParserLoader, RawEntries,
    DEFAULT_PARSERS_CONFIG, PARSERS_CONFIG_ENV,
};
