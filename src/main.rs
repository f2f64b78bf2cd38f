//! Horloge entry point.
//!
//! Parses the command line, picks where logs go and hands the subcommand to
//! the CLI service. Running the clock is the default when no subcommand is
//! given.

use std::{error::Error, process};

use clap::Parser;
use tracing::{Level, info, span};
use horloge::{
    cli::{Cli, CliService, Commands, RunArgs, formatting::format_error},
    tracing_config,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default()));

    if matches!(command, Commands::Run(_)) {
        tracing_config::init_with_file()?;
        let _span = span!(Level::INFO, "horloge_main").entered();
        info!("Starting clock");
    } else {
        tracing_config::init()?;
    }

    let service = CliService::load(cli.config.as_deref(), cli.themes.as_deref());

    match service.execute(command).await {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
