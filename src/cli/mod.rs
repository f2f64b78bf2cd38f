//! Command-line interface.
//!
//! Parses arguments with clap and routes each subcommand through
//! [`CliService`], which owns the loaded settings and themes.

mod args;
pub mod formatting;
mod service;
mod types;


pub use args::{Cli, Commands, ConfigCommands, OutputKind, RunArgs, TickArg};
pub use service::{CliService, parse_config_value};
pub use types::{CliError, CommandResult};
