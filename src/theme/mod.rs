//! Visual themes for the clock.
//!
//! A theme is an immutable bundle of colors, numeral font, hand widths and
//! face features. Themes live in a [`ThemeCatalog`] owned by the shell; the
//! six built-in ones come from [`builtin`], more can be loaded from TOML
//! files with [`load_theme_file`].

mod builtin;
mod catalog;
mod color;
mod file;


use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

pub use builtin::{DEFAULT_THEME, builtin_themes};
pub use catalog::ThemeCatalog;
pub use color::{Color, ColorError};
pub use file::{ThemeFileError, load_theme_file, parse_themes};

/// Number of strokes the glow effect layers on top of each other.
pub const GLOW_PASSES: u32 = 3;

/// Named color slots of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Window background behind the label and canvas
    pub background: Color,
    /// Canvas background around the clock face
    pub canvas: Color,
    /// Fill of the clock face
    pub face: Color,
    /// Hour hand stroke
    pub hour_hand: Color,
    /// Minute hand stroke
    pub minute_hand: Color,
    /// Second hand stroke
    pub second_hand: Color,
    /// Hour numerals
    pub numerals: Color,
    /// Hour and minute tick marks
    pub marks: Color,
    /// Center hub
    pub hub: Color,
    /// Digital readout text
    pub digital_text: Color,
    /// Face outline and glow rings
    pub outline: Color,
}

/// Weight of the numeral font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    Normal,
    /// Bold weight
    #[default]
    Bold,
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Normal => write!(f, "normal"),
            FontWeight::Bold => write!(f, "bold"),
        }
    }
}

/// Font used for the numerals.
///
/// `size` is the theme's nominal size; the renderer derives the actual
/// numeral size from the radius.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Font family name
    pub family: String,
    /// Nominal point size
    pub size: u32,
    /// Font weight
    #[serde(default)]
    pub weight: FontWeight,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 16,
            weight: FontWeight::Bold,
        }
    }
}

/// Hand stroke widths at the reference radius of 150.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandWidths {
    /// Hour hand width
    pub hour: u32,
    /// Minute hand width
    pub minute: u32,
    /// Second hand width
    pub second: u32,
}

impl HandWidths {
    /// Creates hand widths, raising any zero width to 1.
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour.max(1),
            minute: minute.max(1),
            second: second.max(1),
        }
    }
}

impl Default for HandWidths {
    fn default() -> Self {
        Self::new(6, 4, 2)
    }
}

/// How a theme strokes its hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// One stroke per hand
    #[default]
    Plain,
    /// [`GLOW_PASSES`] layered strokes per hand, each wider than the last
    Glow,
}

impl Effect {
    /// Routes one stroke of the given width through the effect.
    ///
    /// `draw` is called once per pass with that pass's width. The glow
    /// passes grow the width by the pass index, accumulating: a width of 2
    /// yields strokes of 2, 3 and 5.
    pub fn apply(self, width: u32, mut draw: impl FnMut(u32)) {
        match self {
            Effect::Plain => draw(width),
            Effect::Glow => {
                let mut width = width;
                for pass in 0..GLOW_PASSES {
                    width += pass;
                    draw(width);
                }
            }
        }
    }
}

bitflags! {
    /// Optional parts of the clock face a theme asks for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FaceFeatures: u8 {
        /// Draw the 48 minute marks between the hour marks
        const MINUTE_TICKS = 1;
        /// Draw concentric glow rings around the face outline
        const GLOW_RING = 1 << 1;
        /// Thinner hour marks, larger numerals and a smaller hub
        const SLIM_MARKS = 1 << 2;
    }
}

impl Default for FaceFeatures {
    fn default() -> Self {
        FaceFeatures::MINUTE_TICKS
    }
}

/// A named visual style. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    name: String,
    palette: Palette,
    font: FontSpec,
    hands: HandWidths,
    effect: Effect,
    features: FaceFeatures,
}

impl Theme {
    /// Creates a theme with the base font, hand widths, plain effect and
    /// minute ticks.
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
            font: FontSpec::default(),
            hands: HandWidths::default(),
            effect: Effect::default(),
            features: FaceFeatures::default(),
        }
    }

    /// Replaces the numeral font.
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Replaces the hand widths.
    pub fn with_hands(mut self, hands: HandWidths) -> Self {
        self.hands = hands;
        self
    }

    /// Replaces the hand effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Replaces the face features.
    pub fn with_features(mut self, features: FaceFeatures) -> Self {
        self.features = features;
        self
    }

    /// Unique name of the theme.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color slots.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Numeral font.
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Hand widths at the reference radius.
    pub fn hands(&self) -> HandWidths {
        self.hands
    }

    /// Hand effect.
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Face features.
    pub fn features(&self) -> FaceFeatures {
        self.features
    }

    /// Whether the theme asks for all of `features`.
    pub fn has(&self, features: FaceFeatures) -> bool {
        self.features.contains(features)
    }
}
