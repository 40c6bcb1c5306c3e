//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use lectio_core::ExternalParserLoader;
use std::path::Path;

pub mod list;
pub mod parse;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Tokenize text files into words and sentences
    Parse(parse::ParseArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Check language or external parser configuration files
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List registered parsers and whether they can run
    Parsers(list::ListParsersArgs),

    /// List available output formats
    Formats,
}

impl Commands {
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Parse(args) => args.execute(),
            Commands::List { subcommand } => match subcommand {
                ListCommands::Parsers(args) => args.execute(),
                ListCommands::Formats => list::list_formats(),
            },
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` takes precedence over the verbosity count.
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}

/// Loader for an explicit path, or the default location
pub(crate) fn parser_loader(path: Option<&Path>) -> ExternalParserLoader {
    match path {
        Some(path) => ExternalParserLoader::with_path(path),
        None => ExternalParserLoader::new(),
    }
}
