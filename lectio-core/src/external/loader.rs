//! Loader for the operator-editable external parser registry
//!
//! The source is a TOML file with one `[parsers.<type>]` table per tool:
//!
//! ```toml
//! [parsers.jieba]
//! name = "Jieba (Chinese)"
//! binary = "python3"
//! args = ["-m", "jieba", "-d", " "]
//! input_mode = "stdin"      # or "file"
//! output_format = "wakati"  # or "line"
//! ```

use super::config::ExternalParserConfig;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Environment variable overriding the configuration path
pub const PARSERS_CONFIG_ENV: &str = "LECTIO_PARSERS_CONFIG";

/// Configuration path used when the environment variable is unset
pub const DEFAULT_PARSERS_CONFIG: &str = "config/parsers.toml";

/// Mapping from parser type to raw entry
pub type RawEntries = toml::Table;

#[derive(Debug, Error)]
enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("'parsers' in '{0}' is not a table")]
    Shape(PathBuf),
}

/// Reads and caches the set of configured external parsers.
///
/// The file is read on first use and again only after [`clear_cache`].
///
/// [`clear_cache`]: ExternalParserLoader::clear_cache
#[derive(Debug)]
pub struct ExternalParserLoader {
    path: PathBuf,
    cache: RwLock<Option<Arc<Vec<ExternalParserConfig>>>>,
}

impl Default for ExternalParserLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ExternalParserLoader {
    /// Loader for [`default_config_path`]
    pub fn new() -> Self {
        Self::with_path(default_config_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw entries keyed by parser type.
    ///
    /// Empty when the file is missing, unreadable or not shaped as expected.
    pub fn load_config(&self) -> RawEntries {
        self.read_source().unwrap_or_else(|e| {
            log::warn!("Ignoring external parser configuration: {e}");
            RawEntries::new()
        })
    }

    /// Validated parsers, cached after the first successful load.
    ///
    /// Invalid entries are skipped with a warning.
    pub fn external_parsers(&self) -> Arc<Vec<ExternalParserConfig>> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(cached);
        }

        let entries = match self.read_source() {
            Ok(entries) => entries,
            Err(e) => {
                // Not cached, so a fixed file is picked up on the next call
                log::warn!("Ignoring external parser configuration: {e}");
                return Arc::new(Vec::new());
            }
        };

        let parsers = Arc::new(validate_entries(&entries));
        log::debug!(
            "Loaded {} external parser(s) from '{}'",
            parsers.len(),
            self.path.display()
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.get_or_insert(parsers))
    }

    /// Look up one configured parser by type
    pub fn parser(&self, parser_type: &str) -> Option<ExternalParserConfig> {
        self.external_parsers()
            .iter()
            .find(|p| p.parser_type() == parser_type)
            .cloned()
    }

    pub fn has_external_parsers(&self) -> bool {
        !self.external_parsers().is_empty()
    }

    /// Forget the cached set; the next query re-reads the file
    pub fn clear_cache(&self) {
        log::debug!("Clearing external parser cache for '{}'", self.path.display());
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// A missing file means nothing is configured and counts as a
    /// successful, empty load.
    fn read_source(&self) -> Result<RawEntries, LoadError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    "No external parser configuration at '{}'",
                    self.path.display()
                );
                return Ok(RawEntries::new());
            }
            Err(source) => {
                return Err(LoadError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut document: toml::Table =
            toml::from_str(&content).map_err(|source| LoadError::Toml {
                path: self.path.clone(),
                source,
            })?;

        match document.remove("parsers") {
            None => Ok(RawEntries::new()),
            Some(toml::Value::Table(entries)) => Ok(entries),
            Some(_) => Err(LoadError::Shape(self.path.clone())),
        }
    }
}

/// Path from `LECTIO_PARSERS_CONFIG`, or `config/parsers.toml`
pub fn default_config_path() -> PathBuf {
    std::env::var_os(PARSERS_CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PARSERS_CONFIG))
}

/// Build configs from raw entries, skipping the invalid ones
pub fn validate_entries(entries: &RawEntries) -> Vec<ExternalParserConfig> {
    entries
        .iter()
        .filter_map(
            |(key, entry)| match ExternalParserConfig::from_entry(key, entry) {
                Ok(config) => Some(config),
                Err(reason) => {
                    log::warn!("Skipping external parser '{key}': {reason}");
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"
[parsers.jieba]
name = "Jieba (Chinese)"
binary = "jieba_tokenize"

[parsers.broken]
name = "Missing binary"
"#;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("parsers.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_empty() {
        let loader = ExternalParserLoader::with_path("/nonexistent/parsers.toml");
        assert!(loader.load_config().is_empty());
        assert!(loader.external_parsers().is_empty());
        assert!(!loader.has_external_parsers());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let loader = ExternalParserLoader::with_path(write_config(&dir, "[parsers\nname ="));
        assert!(loader.load_config().is_empty());
        assert!(loader.external_parsers().is_empty());
    }

    #[test]
    fn test_wrong_shape_is_empty() {
        let dir = TempDir::new().unwrap();
        let loader = ExternalParserLoader::with_path(write_config(&dir, "parsers = 3"));
        assert!(loader.load_config().is_empty());
    }

    #[test]
    fn test_invalid_entry_skipped() {
        let dir = TempDir::new().unwrap();
        let loader = ExternalParserLoader::with_path(write_config(&dir, VALID));

        assert_eq!(loader.load_config().len(), 2);

        let parsers = loader.external_parsers();
        assert_eq!(parsers.len(), 1);
        assert_eq!(parsers[0].parser_type(), "jieba");
        assert!(loader.parser("jieba").is_some());
        assert!(loader.parser("broken").is_none());
    }

    #[test]
    fn test_cache_until_cleared() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);
        let loader = ExternalParserLoader::with_path(&path);

        let first = loader.external_parsers();
        fs::write(&path, "").unwrap();
        let second = loader.external_parsers();
        assert!(Arc::ptr_eq(&first, &second));

        loader.clear_cache();
        assert!(loader.external_parsers().is_empty());
    }

    #[test]
    fn test_failed_reload_does_not_surface_stale_data() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, VALID);
        let loader = ExternalParserLoader::with_path(&path);
        assert_eq!(loader.external_parsers().len(), 1);

        fs::write(&path, "not [valid toml").unwrap();
        loader.clear_cache();
        assert!(loader.external_parsers().is_empty());

        // Failed loads are not cached
        fs::write(&path, VALID).unwrap();
        assert_eq!(loader.external_parsers().len(), 1);
    }
}
