use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use schemars::{Schema, schema_for};
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::config::{Position, Settings, Size};

use super::{ConfigChange, ConfigError};

/// The clock's settings together with the file they persist to.
///
/// Every successful [`set`](Self::set) rewrites the whole file unless the
/// `save_settings` key is false. Loading and saving never fail the caller:
/// an unreadable file means defaults, a failed write is logged and the new
/// value still applies for the running session.
#[derive(Debug, Clone)]
pub struct ClockConfig {
    settings: Settings,
    path: Option<PathBuf>,
}

impl ClockConfig {
    /// Creates a config with default values that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            settings: Settings::default(),
            path: None,
        }
    }

    /// Creates a config from explicit settings, persisting to `path` if given.
    pub fn from_settings(settings: Settings, path: Option<PathBuf>) -> Self {
        Self { settings, path }
    }

    /// Loads settings from `path`, falling back to defaults.
    ///
    /// A missing file yields defaults and is not created until the first
    /// [`set`](Self::set). A file that cannot be read or parsed yields
    /// defaults and a warning.
    #[instrument]
    pub fn load(path: &Path) -> Self {
        let settings = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Settings>(&content) {
                Ok(settings) => {
                    info!("Loaded clock settings");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Invalid settings file, using defaults");
                    Settings::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings file found, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!(error = %e, "Unreadable settings file, using defaults");
                Settings::default()
            }
        };

        Self {
            settings,
            path: Some(path.to_path_buf()),
        }
    }

    /// Returns the raw value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.to_object().ok()?.remove(key)
    }

    /// Returns the value stored under `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Stores `value` under `key` and persists the settings.
    ///
    /// Keys the clock does not know are stored as-is. Known keys must hold a
    /// value of the right shape; a rejected value leaves the settings
    /// untouched.
    ///
    /// # Errors
    /// * `ConfigError::InvalidKey` - If the key is empty
    /// * `ConfigError::InvalidValue` - If the value does not fit the key
    /// * `ConfigError::SerializationError` - If the current settings cannot be serialized
    #[instrument(skip(self, value), fields(value = %value))]
    pub fn set(&mut self, key: &str, value: Value) -> Result<ConfigChange, ConfigError> {
        if key.trim().is_empty() {
            return Err(ConfigError::InvalidKey(key.to_string()));
        }

        let mut object = self.to_object()?;
        let old_value = object.insert(key.to_string(), value.clone());

        let updated: Settings =
            serde_json::from_value(Value::Object(object)).map_err(|e| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    details: e.to_string(),
                }
            })?;

        self.settings = updated;
        debug!("Setting updated");
        self.persist();

        Ok(ConfigChange::new(key.to_string(), old_value, value))
    }

    /// Writes the settings file, honoring `save_settings`.
    ///
    /// Does nothing for in-memory configs or when `save_settings` is false.
    ///
    /// # Errors
    /// * `ConfigError::SerializationError` - If the settings cannot be serialized
    /// * `ConfigError::PersistenceError` - If the file cannot be written
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if !self.settings.save_settings {
            debug!("Saving disabled, settings kept in memory only");
            return Ok(());
        }

        let content = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            ConfigError::SerializationError {
                content_type: "settings".to_string(),
                details: e.to_string(),
            }
        })?;

        let persistence_error = |e: std::io::Error| ConfigError::PersistenceError {
            path: path.clone(),
            details: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persistence_error)?;
        }
        fs::write(path, content).map_err(persistence_error)?;

        Ok(())
    }

    /// Typed view of all settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// File the settings persist to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// JSON schema of the settings file.
    pub fn schema() -> Schema {
        schema_for!(Settings)
    }

    /// Theme restored by a reset.
    pub fn default_theme(&self) -> &str {
        &self.settings.default_theme
    }

    /// Theme currently shown.
    pub fn current_theme(&self) -> &str {
        &self.settings.current_theme
    }

    /// Stores the current theme name.
    ///
    /// # Errors
    /// See [`set`](Self::set).
    pub fn set_current_theme(&mut self, name: &str) -> Result<ConfigChange, ConfigError> {
        self.set("current_theme", Value::String(name.to_string()))
    }

    /// Size of the clock window.
    pub fn window_size(&self) -> Size {
        self.settings.window_size
    }

    /// Size of the clock canvas.
    pub fn clock_size(&self) -> Size {
        self.settings.clock_size
    }

    /// Center of the clock face.
    pub fn center_position(&self) -> Position {
        self.settings.center_position
    }

    /// Radius of the clock face.
    pub fn radius(&self) -> u32 {
        self.settings.radius
    }

    /// Time zone label.
    pub fn timezone(&self) -> &str {
        &self.settings.timezone
    }

    /// Whether the window stays on top. False until first toggled.
    pub fn always_on_top(&self) -> bool {
        self.settings.always_on_top.unwrap_or(false)
    }

    /// Whether the digital readout is shown.
    pub fn show_digital_clock(&self) -> bool {
        self.settings.show_digital_clock
    }

    /// Whether changes are persisted.
    pub fn save_settings(&self) -> bool {
        self.settings.save_settings
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "Failed to save settings, keeping change in memory");
        }
    }

    fn to_object(&self) -> Result<Map<String, Value>, ConfigError> {
        match serde_json::to_value(&self.settings) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(other) => Err(ConfigError::SerializationError {
                content_type: "settings".to_string(),
                details: format!("expected an object, got {other}"),
            }),
            Err(e) => Err(ConfigError::SerializationError {
                content_type: "settings".to_string(),
                details: e.to_string(),
            }),
        }
    }
}
