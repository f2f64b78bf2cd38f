//! Operations behind the settings UI.
//!
//! Each operation writes the affected keys through [`ClockConfig::set`] and
//! returns the recorded changes; the shell applies them to the running
//! clock. Rejected input leaves the configuration untouched.

#[cfg(test)]
mod tests;

use std::{fmt, str::FromStr};

use serde_json::{Value, json};
use thiserror::Error;
use tracing::instrument;

use crate::config_store::{ClockConfig, ConfigChange, ConfigError};

/// Smallest clock size accepted from free-form input.
pub const MIN_CUSTOM_SIZE: u32 = 200;
/// Largest clock size accepted from free-form input.
pub const MAX_CUSTOM_SIZE: u32 = 800;

/// Canned clock sizes offered next to the free-form entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePreset {
    /// 250 px
    Small,
    /// 350 px, the default
    Medium,
    /// 450 px
    Large,
    /// 550 px
    XLarge,
}

impl SizePreset {
    /// All presets, smallest first.
    pub const ALL: [SizePreset; 4] = [
        SizePreset::Small,
        SizePreset::Medium,
        SizePreset::Large,
        SizePreset::XLarge,
    ];

    /// Clock size in pixels.
    pub fn pixels(self) -> u32 {
        match self {
            SizePreset::Small => 250,
            SizePreset::Medium => 350,
            SizePreset::Large => 450,
            SizePreset::XLarge => 550,
        }
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SizePreset::Small => "small",
            SizePreset::Medium => "medium",
            SizePreset::Large => "large",
            SizePreset::XLarge => "xlarge",
        };
        write!(f, "{label} ({}px)", self.pixels())
    }
}

impl FromStr for SizePreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(SizePreset::Small),
            "medium" => Ok(SizePreset::Medium),
            "large" => Ok(SizePreset::Large),
            "xlarge" => Ok(SizePreset::XLarge),
            _ => Err(()),
        }
    }
}

/// Why free-form size input was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeInputError {
    /// The text is not a whole number
    #[error("'{input}' is not a number")]
    NotANumber {
        /// The rejected text
        input: String,
    },

    /// The number is outside the accepted range
    #[error("size must be between 200 and 800, got {size}")]
    OutOfRange {
        /// The rejected size
        size: i64,
    },
}

impl SizeInputError {
    /// Title for the alert shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            SizeInputError::NotANumber { .. } => "Input error",
            SizeInputError::OutOfRange { .. } => "Range error",
        }
    }
}

/// Errors from settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Free-form size input was rejected
    #[error(transparent)]
    Size(#[from] SizeInputError),

    /// The configuration refused a value
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parses free-form size text.
///
/// # Errors
/// * `SizeInputError::NotANumber` - If the text is not an integer
/// * `SizeInputError::OutOfRange` - If the integer is outside 200..=800
pub fn parse_custom_size(input: &str) -> Result<u32, SizeInputError> {
    let trimmed = input.trim();
    let size: i64 = trimmed.parse().map_err(|_| SizeInputError::NotANumber {
        input: trimmed.to_string(),
    })?;

    u32::try_from(size)
        .ok()
        .filter(|s| (MIN_CUSTOM_SIZE..=MAX_CUSTOM_SIZE).contains(s))
        .ok_or(SizeInputError::OutOfRange { size })
}

/// What the settings window shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    /// Themes to pick from, in catalog order
    pub themes: Vec<String>,
    /// Theme currently shown
    pub current_theme: String,
    /// Always-on-top checkbox
    pub always_on_top: bool,
    /// Digital readout checkbox
    pub show_digital_clock: bool,
    /// Current clock size in pixels
    pub clock_size: u32,
    /// Presets offered
    pub presets: Vec<SizePreset>,
}

impl SettingsView {
    /// Snapshot of the configuration for the settings window.
    pub fn from_config(config: &ClockConfig, themes: Vec<String>) -> Self {
        Self {
            themes,
            current_theme: config.current_theme().to_string(),
            always_on_top: config.always_on_top(),
            show_digital_clock: config.show_digital_clock(),
            clock_size: config.clock_size().width,
            presets: SizePreset::ALL.to_vec(),
        }
    }
}

/// Settings operations over a borrowed configuration.
#[derive(Debug)]
pub struct SettingsPanel<'a> {
    config: &'a mut ClockConfig,
}

impl<'a> SettingsPanel<'a> {
    /// Opens the panel on `config`.
    pub fn new(config: &'a mut ClockConfig) -> Self {
        Self { config }
    }

    /// Stores the theme to display.
    ///
    /// # Errors
    /// Returns `SettingsError::Config` if the value is rejected.
    pub fn select_theme(&mut self, name: &str) -> Result<ConfigChange, SettingsError> {
        Ok(self.config.set_current_theme(name)?)
    }

    /// Stores the always-on-top flag.
    ///
    /// # Errors
    /// Returns `SettingsError::Config` if the value is rejected.
    pub fn set_always_on_top(&mut self, on: bool) -> Result<ConfigChange, SettingsError> {
        Ok(self.config.set("always_on_top", Value::Bool(on))?)
    }

    /// Stores whether the digital readout is shown.
    ///
    /// # Errors
    /// Returns `SettingsError::Config` if the value is rejected.
    pub fn set_show_digital(&mut self, on: bool) -> Result<ConfigChange, SettingsError> {
        Ok(self.config.set("show_digital_clock", Value::Bool(on))?)
    }

    /// Applies a preset size.
    ///
    /// # Errors
    /// Returns `SettingsError::Config` if a value is rejected.
    pub fn apply_preset(&mut self, preset: SizePreset) -> Result<Vec<ConfigChange>, SettingsError> {
        self.apply_size(preset.pixels())
    }

    /// Validates free-form size text and applies it.
    ///
    /// # Errors
    /// Returns `SettingsError::Size` for rejected input, in which case
    /// nothing is written.
    #[instrument(skip(self))]
    pub fn apply_custom_size(&mut self, input: &str) -> Result<Vec<ConfigChange>, SettingsError> {
        let size = parse_custom_size(input)?;
        self.apply_size(size)
    }

    /// Writes window size, clock size, center and radius for a clock of
    /// `size` pixels.
    ///
    /// # Errors
    /// Returns `SettingsError::Config` if a value is rejected.
    pub fn apply_size(&mut self, size: u32) -> Result<Vec<ConfigChange>, SettingsError> {
        let half = size / 2;
        let radius = size.saturating_sub(50) / 2;

        self.write_all([
            (
                "window_size",
                json!({"width": size + 50, "height": size + 100}),
            ),
            ("clock_size", json!({"width": size, "height": size})),
            ("center_position", json!({"x": half, "y": half})),
            ("radius", json!(radius)),
        ])
    }

    /// Restores theme, toggles and size to their defaults.
    ///
    /// # Errors
    /// Returns `SettingsError::Config` if a value is rejected.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<Vec<ConfigChange>, SettingsError> {
        let default_theme = self.config.default_theme().to_string();

        self.write_all([
            ("current_theme", Value::String(default_theme)),
            ("always_on_top", Value::Bool(false)),
            ("show_digital_clock", Value::Bool(true)),
            ("window_size", json!({"width": 400, "height": 450})),
            ("clock_size", json!({"width": 350, "height": 350})),
            ("center_position", json!({"x": 175, "y": 175})),
            ("radius", json!(150)),
        ])
    }

    fn write_all<const N: usize>(
        &mut self,
        entries: [(&str, Value); N],
    ) -> Result<Vec<ConfigChange>, SettingsError> {
        entries
            .into_iter()
            .map(|(key, value)| self.config.set(key, value).map_err(SettingsError::from))
            .collect()
    }
}
