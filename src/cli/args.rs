use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::shell::TickPolicy;

/// Analog and digital desk clock.
#[derive(Parser, Debug)]
#[command(name = "horloge", version)]
#[command(about = "Analog and digital desk clock with themes")]
pub struct Cli {
    /// Settings file (default: clock_config.json in the working directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra themes file in TOML (default: ~/.horloge/themes.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub themes: Option<PathBuf>,

    /// What to do; runs the clock when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the clock, reading commands from stdin
    Run(RunArgs),

    /// Write a single frame as SVG
    Render {
        /// Time to show as HH:MM:SS (default: now)
        #[arg(long)]
        time: Option<String>,

        /// Theme to use instead of the configured one
        #[arg(long)]
        theme: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "clock.svg")]
        out: PathBuf,
    },

    /// List available themes
    Themes,

    /// Read or change settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Options of the `run` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Where frames go
    #[arg(long, value_enum, default_value_t = OutputKind::Terminal)]
    pub output: OutputKind,

    /// SVG file rewritten every frame when the output is svg
    #[arg(long, default_value = "clock.svg")]
    pub svg_path: PathBuf,

    /// How ticks are scheduled
    #[arg(long, value_enum, default_value_t = TickArg::FixedDelay)]
    pub tick: TickArg,

    /// Width of the face in terminal columns
    #[arg(long, default_value_t = 48)]
    pub cols: u32,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            output: OutputKind::Terminal,
            svg_path: PathBuf::from("clock.svg"),
            tick: TickArg::FixedDelay,
            cols: 48,
        }
    }
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print one setting, or all of them
    Get {
        /// Settings key, e.g. current_theme
        key: Option<String>,
    },

    /// Change a setting; the value is read as JSON, or as text if it is not
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },

    /// Print the JSON schema of the settings file
    Schema,
}

/// Frame destination.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// True-color terminal
    Terminal,
    /// SVG file
    Svg,
}

/// Tick scheduling on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickArg {
    /// Wait one second after each tick
    FixedDelay,
    /// Tick on a fixed one-second grid
    Interval,
}

impl From<TickArg> for TickPolicy {
    fn from(arg: TickArg) -> Self {
        match arg {
            TickArg::FixedDelay => TickPolicy::FixedDelay,
            TickArg::Interval => TickPolicy::Interval,
        }
    }
}
