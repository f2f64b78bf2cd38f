use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveTime};
use serde_json::Value;
use tokio::io::BufReader;
use tracing::{info, instrument, warn};

use crate::{
    config::ConfigPaths,
    config_store::ClockConfig,
    present::{Presenter, SvgPresenter, TerminalPresenter},
    shell::ClockShell,
    theme::{ThemeCatalog, load_theme_file},
    time_source::{FixedClock, SystemClock},
};

use super::{
    CliError, CommandResult,
    args::{Commands, ConfigCommands, OutputKind, RunArgs},
    formatting::{format_current, format_description, format_header, format_json_value},
};

/// Service for executing CLI commands.
///
/// Holds the loaded settings and the theme catalog (built-in themes plus
/// any from the themes file) and dispatches parsed subcommands to them.
#[derive(Debug)]
pub struct CliService {
    config: ClockConfig,
    catalog: ThemeCatalog,
}

impl CliService {
    /// Creates a service from already loaded parts.
    pub fn new(config: ClockConfig, catalog: ThemeCatalog) -> Self {
        Self { config, catalog }
    }

    /// Loads settings and themes from their files.
    ///
    /// `config_path` defaults to the working-directory settings file. The
    /// themes file is optional: a missing default file is skipped silently,
    /// a broken one is logged and skipped.
    pub fn load(config_path: Option<&Path>, themes_path: Option<&Path>) -> Self {
        let config_path = config_path.map_or_else(ConfigPaths::settings_file, Path::to_path_buf);
        let config = ClockConfig::load(&config_path);

        let mut catalog = ThemeCatalog::with_builtin_themes();
        if let Some(path) = themes_file(themes_path) {
            match load_theme_file(&path) {
                Ok(themes) => {
                    info!(count = themes.len(), path = %path.display(), "Loaded user themes");
                    for theme in themes {
                        catalog.register(theme);
                    }
                }
                Err(e) => warn!(error = %e, "Ignoring themes file"),
            }
        }

        Self::new(config, catalog)
    }

    /// The loaded settings.
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    /// Executes a subcommand and returns the text to print.
    ///
    /// # Errors
    /// Returns the command's error.
    pub async fn execute(self, command: Commands) -> CommandResult {
        match command {
            Commands::Run(args) => self.run(args).await,
            Commands::Render { time, theme, out } => {
                self.render(time.as_deref(), theme.as_deref(), &out)
            }
            Commands::Themes => Ok(self.themes()),
            Commands::Config(ConfigCommands::Get { key }) => self.config_get(key.as_deref()),
            Commands::Config(ConfigCommands::Set { key, value }) => {
                let mut service = self;
                service.config_set(&key, &value)
            }
            Commands::Config(ConfigCommands::Schema) => Self::config_schema(),
        }
    }

    /// Runs the clock until `exit` on stdin or Ctrl-C.
    ///
    /// # Errors
    /// Returns `CliError::Clock` if the clock cannot start or fails while
    /// running.
    #[instrument(skip(self))]
    pub async fn run(self, args: RunArgs) -> CommandResult {
        let presenter: Box<dyn Presenter> = match args.output {
            OutputKind::Terminal => Box::new(TerminalPresenter::new(io::stdout(), args.cols)),
            OutputKind::Svg => Box::new(SvgPresenter::new(args.svg_path)),
        };
        let time = SystemClock::new(self.config.timezone());

        let mut shell = ClockShell::new(presenter, time).with_tick_policy(args.tick.into());
        shell.initialize(self.config, self.catalog)?;

        let stop = shell.stop_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stop.stop();
            }
        });

        shell.run(BufReader::new(tokio::io::stdin())).await?;
        Ok(String::new())
    }

    /// Writes one frame to `out` as SVG.
    ///
    /// # Errors
    /// * `CliError::InvalidArguments` - If the time or theme is not valid
    /// * `CliError::Clock` - If rendering or writing fails
    #[instrument(skip(self))]
    pub fn render(self, time: Option<&str>, theme: Option<&str>, out: &Path) -> CommandResult {
        let now = Local::now().naive_local();
        let at = match time {
            Some(text) => {
                let clock_time = NaiveTime::parse_from_str(text, "%H:%M:%S").map_err(|e| {
                    CliError::InvalidArguments(format!("time '{text}' is not HH:MM:SS: {e}"))
                })?;
                now.date().and_time(clock_time)
            }
            None => now,
        };

        let mut config = ClockConfig::from_settings(self.config.settings().clone(), None);
        if let Some(name) = theme {
            if !self.catalog.contains(name) {
                return Err(CliError::InvalidArguments(format!("unknown theme '{name}'")));
            }
            config.set_current_theme(name)?;
        }

        let mut shell = ClockShell::new(SvgPresenter::new(out), FixedClock::new(at));
        shell.initialize(config, self.catalog)?;
        shell.tick()?;
        shell.shutdown()?;

        Ok(format!("Wrote {}", out.display()))
    }

    /// Lists the catalog, marking the configured theme.
    pub fn themes(&self) -> String {
        let current = self.config.current_theme();
        let mut lines = vec![format_header("Themes:")];

        for theme in self.catalog.iter() {
            let name = theme.name();
            if name == current {
                lines.push(format!("  {} {}", format_current(name), format_description("(current)")));
            } else {
                lines.push(format!("  {name}"));
            }
        }

        lines.join("\n")
    }

    /// Prints one setting, or every setting when `key` is `None`.
    ///
    /// # Errors
    /// Returns `CliError::InvalidArguments` if the key is not set.
    pub fn config_get(&self, key: Option<&str>) -> CommandResult {
        match key {
            Some(key) => self
                .config
                .get(key)
                .map(|value| format!("{key}: {}", format_json_value(&value)))
                .ok_or_else(|| CliError::InvalidArguments(format!("no setting named '{key}'"))),
            None => {
                let settings = serde_json::to_value(self.config.settings())
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
                let Value::Object(map) = settings else {
                    return Ok(format_json_value(&settings));
                };
                Ok(map
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", format_json_value(value)))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }

    /// Changes a setting and saves the file.
    ///
    /// # Errors
    /// Returns `CliError::Config` if the value does not fit the key.
    pub fn config_set(&mut self, key: &str, raw: &str) -> CommandResult {
        let value = parse_config_value(raw);
        let change = self.config.set(key, value)?;

        Ok(format!(
            "Set '{key}' to {}",
            format_json_value(&change.new_value)
        ))
    }

    /// Prints the JSON schema of the settings file.
    ///
    /// # Errors
    /// Returns `CliError::InvalidArguments` if the schema cannot be serialized.
    pub fn config_schema() -> CommandResult {
        serde_json::to_string_pretty(&ClockConfig::schema())
            .map_err(|e| CliError::InvalidArguments(e.to_string()))
    }
}

/// Reads a command-line value as JSON, falling back to plain text.
pub fn parse_config_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn themes_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    ConfigPaths::themes_file()
        .ok()
        .filter(|path| path.exists())
}
