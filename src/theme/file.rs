use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use super::{Effect, FaceFeatures, FontSpec, HandWidths, Palette, Theme};

/// Errors raised while loading user theme files.
#[derive(Error, Debug)]
pub enum ThemeFileError {
    /// The file could not be read
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// The content is not a valid theme document
    #[error("failed to parse themes at '{location}': {details}")]
    Parse {
        /// File path or "string"
        location: String,
        /// Parse error details
        details: String,
    },

    /// A theme definition is structurally fine but unusable
    #[error("invalid theme '{name}': {reason}")]
    Invalid {
        /// Name of the offending theme (may be empty)
        name: String,
        /// Why it was rejected
        reason: String,
    },
}

#[derive(Debug, Deserialize)]
struct ThemeDocument {
    #[serde(default)]
    theme: Vec<ThemeDefinition>,
}

#[derive(Debug, Deserialize)]
struct ThemeDefinition {
    name: String,
    palette: Palette,
    #[serde(default)]
    font: Option<FontSpec>,
    #[serde(default)]
    hands: Option<HandWidths>,
    #[serde(default)]
    effect: Effect,
    #[serde(default)]
    features: FeatureDefinition,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FeatureDefinition {
    minute_ticks: bool,
    glow_ring: bool,
    slim_marks: bool,
}

impl Default for FeatureDefinition {
    fn default() -> Self {
        Self {
            minute_ticks: true,
            glow_ring: false,
            slim_marks: false,
        }
    }
}

impl From<FeatureDefinition> for FaceFeatures {
    fn from(definition: FeatureDefinition) -> Self {
        let mut features = FaceFeatures::empty();
        features.set(FaceFeatures::MINUTE_TICKS, definition.minute_ticks);
        features.set(FaceFeatures::GLOW_RING, definition.glow_ring);
        features.set(FaceFeatures::SLIM_MARKS, definition.slim_marks);
        features
    }
}

impl TryFrom<ThemeDefinition> for Theme {
    type Error = ThemeFileError;

    fn try_from(definition: ThemeDefinition) -> Result<Self, Self::Error> {
        let name = definition.name.trim().to_string();
        if name.is_empty() {
            return Err(ThemeFileError::Invalid {
                name,
                reason: "name must not be empty".to_string(),
            });
        }

        let mut theme = Theme::new(name, definition.palette)
            .with_effect(definition.effect)
            .with_features(definition.features.into());

        if let Some(font) = definition.font {
            theme = theme.with_font(font);
        }
        if let Some(hands) = definition.hands {
            theme = theme.with_hands(HandWidths::new(hands.hour, hands.minute, hands.second));
        }

        Ok(theme)
    }
}

/// Parses a TOML document of `[[theme]]` tables.
///
/// # Errors
/// Returns `ThemeFileError::Parse` for malformed TOML or missing palette
/// slots, and `ThemeFileError::Invalid` for a theme with an empty name.
pub fn parse_themes(content: &str, location: Option<&Path>) -> Result<Vec<Theme>, ThemeFileError> {
    let document: ThemeDocument =
        toml::from_str(content).map_err(|e| ThemeFileError::Parse {
            location: location
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "string".to_string()),
            details: e.to_string(),
        })?;

    document.theme.into_iter().map(Theme::try_from).collect()
}

/// Reads and parses a theme file.
///
/// # Errors
/// Returns `ThemeFileError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_themes`].
#[instrument]
pub fn load_theme_file(path: &Path) -> Result<Vec<Theme>, ThemeFileError> {
    let content = fs::read_to_string(path).map_err(|e| ThemeFileError::Io {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let themes = parse_themes(&content, Some(path))?;
    info!(count = themes.len(), "Loaded user themes");

    Ok(themes)
}
