//! lectio CLI library
//!
//! Commands, input handling and output formatting behind the `lectio`
//! binary.

pub mod commands;
pub mod error;
pub mod input;
pub mod output;

pub use error::{CliError, CliResult};
