use std::{
    env,
    io::{Error, ErrorKind},
    path::PathBuf,
};

/// File name of the settings file, resolved against the working directory.
const SETTINGS_FILE: &str = "clock_config.json";

/// File name of the user theme file inside the data directory.
const THEMES_FILE: &str = "themes.toml";

/// Utility struct for locating the files the clock reads and writes
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the default settings file path
    ///
    /// The settings file lives next to where the clock is started, so the
    /// path is relative.
    pub fn settings_file() -> PathBuf {
        PathBuf::from(SETTINGS_FILE)
    }

    /// Returns the application data directory path
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns an error if HOME environment variable is not set or directory cannot be created
    pub fn app_data_dir() -> Result<PathBuf, Error> {
        let data_dir = env::var("HOME")
            .map(|home| format!("{home}/.horloge"))
            .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not found"))?;

        let app_dir = PathBuf::from(data_dir);

        if !app_dir.exists() {
            std::fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    /// Returns the user theme file path inside the data directory
    ///
    /// The file itself is optional and is not created.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be resolved
    pub fn themes_file() -> Result<PathBuf, Error> {
        Ok(Self::app_data_dir()?.join(THEMES_FILE))
    }

    /// Get the application log directory
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    /// Returns error if directory cannot be created
    pub fn log_dir() -> Result<PathBuf, Error> {
        let log_dir = Self::app_data_dir()?.join("logs");

        if !log_dir.exists() {
            std::fs::create_dir_all(&log_dir)?;
        }

        Ok(log_dir)
    }
}
