use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::theme::DEFAULT_THEME;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Creates a square size.
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// A point on the clock canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    /// Horizontal offset from the canvas' left edge
    pub x: i32,
    /// Vertical offset from the canvas' top edge
    pub y: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Persisted clock settings.
///
/// Serializes to the flat JSON object stored in the settings file. Keys the
/// clock does not know about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Settings {
    /// Theme restored by a settings reset.
    pub default_theme: String,

    /// Theme shown on the clock.
    pub current_theme: String,

    /// Size of the whole clock window.
    pub window_size: Size,

    /// Size of the canvas holding the clock face.
    pub clock_size: Size,

    /// Center of the clock face on the canvas.
    pub center_position: Position,

    /// Radius of the clock face in pixels.
    pub radius: u32,

    /// Time zone label. Only "local" is honored.
    pub timezone: String,

    /// Whether changes are written back to the settings file.
    pub save_settings: bool,

    /// Whether the digital readout is visible.
    pub show_digital_clock: bool,

    /// Whether sounds are enabled. Stored, not used.
    pub enable_sounds: bool,

    /// Whether animations are enabled. Stored, not used.
    pub enable_animations: bool,

    /// Whether the clock stays above other windows. Absent until first toggled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_on_top: Option<bool>,

    /// Unrecognized keys, preserved across saves.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME.to_string(),
            current_theme: DEFAULT_THEME.to_string(),
            window_size: Size::new(400, 500),
            clock_size: Size::square(350),
            center_position: Position::new(175, 175),
            radius: 150,
            timezone: "local".to_string(),
            save_settings: true,
            show_digital_clock: true,
            enable_sounds: false,
            enable_animations: true,
            always_on_top: None,
            extra: Map::new(),
        }
    }
}
