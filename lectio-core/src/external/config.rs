//! Description of one external segmenter

use crate::process::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use toml::Value;

/// How text reaches the external binary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Written to the process's standard input, which is then closed
    #[default]
    Stdin,
    /// Written to a temporary file whose path is appended to the arguments
    File,
}

/// How the binary's standard output is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One token per line, blank lines between sentences
    #[default]
    Line,
    /// A single whitespace-separated stream of tokens
    Wakati,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Stdin => "stdin",
            InputMode::File => "file",
        }
    }
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Line => "line",
            OutputFormat::Wakati => "wakati",
        }
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdin" => Ok(InputMode::Stdin),
            "file" => Ok(InputMode::File),
            other => Err(format!("unknown input_mode '{other}' (expected stdin or file)")),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(OutputFormat::Line),
            "wakati" => Ok(OutputFormat::Wakati),
            other => Err(format!(
                "unknown output_format '{other}' (expected line or wakati)"
            )),
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured external tool. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalParserConfig {
    parser_type: String,
    name: String,
    binary: String,
    args: Vec<String>,
    input_mode: InputMode,
    output_format: OutputFormat,
    timeout: Duration,
}

impl ExternalParserConfig {
    /// Validate a raw configuration entry.
    ///
    /// `name` and `binary` must be non-empty strings. Optional fields fall
    /// back to their defaults when absent but reject the entry when present
    /// with the wrong shape.
    pub fn from_entry(key: &str, entry: &Value) -> Result<Self, String> {
        if key.trim().is_empty() {
            return Err("empty parser type".to_string());
        }

        let table = entry
            .as_table()
            .ok_or_else(|| format!("entry is a {}, expected a table", entry.type_str()))?;

        let name = required_string(table, "name")?;
        let binary = required_string(table, "binary")?;

        let args = match table.get("args") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| "args must contain only strings".to_string())
                })
                .collect::<Result<_, _>>()?,
            Some(_) => return Err("args must be an array of strings".to_string()),
        };

        let input_mode = match table.get("input_mode") {
            None => InputMode::default(),
            Some(value) => value
                .as_str()
                .ok_or_else(|| "input_mode must be a string".to_string())?
                .parse()?,
        };

        let output_format = match table.get("output_format") {
            None => OutputFormat::default(),
            Some(value) => value
                .as_str()
                .ok_or_else(|| "output_format must be a string".to_string())?
                .parse()?,
        };

        let timeout = match table.get("timeout_secs") {
            None => DEFAULT_TIMEOUT,
            Some(Value::Integer(secs)) if *secs > 0 => Duration::from_secs(*secs as u64),
            Some(Value::Float(secs)) if *secs > 0.0 && secs.is_finite() => {
                Duration::from_secs_f64(*secs)
            }
            Some(_) => return Err("timeout_secs must be a positive number".to_string()),
        };

        Ok(Self {
            parser_type: key.to_string(),
            name,
            binary,
            args,
            input_mode,
            output_format,
            timeout,
        })
    }

    /// Unique key used to select this parser
    pub fn parser_type(&self) -> &str {
        &self.parser_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn required_string(table: &toml::Table, field: &str) -> Result<String, String> {
    match table.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(format!("'{field}' is empty")),
        Some(other) => Err(format!("'{field}' must be a string, got {}", other.type_str())),
        None => Err(format!("missing required field '{field}'")),
    }
}
