use crate::{config_store::ClockConfig, time_source::canvas_direction};

use super::Point;

/// Radius the hand lengths and widths are designed for.
pub const REFERENCE_RADIUS: f64 = 150.0;

/// Length, inset and width of a tick mark.
///
/// A mark runs from `radius - length` to `radius - inset` along its spoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkSpec {
    /// Distance of the inner end from the rim
    pub length: u32,
    /// Distance of the outer end from the rim
    pub inset: u32,
    /// Stroke width
    pub width: u32,
}

/// Hand lengths in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandLengths {
    /// Hour hand
    pub hour: u32,
    /// Minute hand
    pub minute: u32,
    /// Second hand
    pub second: u32,
}

/// Center and radius of the face, and every size derived from them.
///
/// Sizes use integer division on the radius and clamp to a floor so small
/// clocks never get zero-width strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    /// Center of the face
    pub center: Point,
    /// Radius of the face
    pub radius: u32,
}

impl FaceGeometry {
    /// Creates a geometry.
    pub fn new(center: Point, radius: u32) -> Self {
        Self { center, radius }
    }

    /// Reads center and radius from the settings.
    pub fn from_config(config: &ClockConfig) -> Self {
        let center = config.center_position();
        Self::new(
            Point::new(f64::from(center.x), f64::from(center.y)),
            config.radius(),
        )
    }

    /// Face outline width.
    pub fn outline_width(&self) -> u32 {
        (self.radius / 50).max(1)
    }

    /// Number of glow rings around the outline.
    pub fn glow_rings(&self) -> u32 {
        (self.radius / 75).max(2)
    }

    /// Distance of the numerals from the center.
    pub fn numeral_distance(&self) -> f64 {
        let radius = f64::from(self.radius);
        radius - (radius / 7.5).floor().max(20.0)
    }

    /// Numeral font size.
    pub fn numeral_size(&self, slim: bool) -> u32 {
        if slim {
            (self.radius / 8).max(12)
        } else {
            (self.radius / 10).max(10)
        }
    }

    /// The twelve hour marks.
    pub fn hour_mark(&self, slim: bool) -> MarkSpec {
        let length = (self.radius / 18).max(8);
        let width = if slim {
            (self.radius / 75).max(1)
        } else {
            (self.radius / 50).max(2)
        };

        MarkSpec {
            length,
            inset: (length / 3).max(3),
            width,
        }
    }

    /// The minute marks between the hour marks.
    pub fn minute_mark(&self) -> MarkSpec {
        let length = (self.radius / 30).max(4);

        MarkSpec {
            length,
            inset: (length / 2).max(2),
            width: 1,
        }
    }

    /// Ratio of the radius to the reference radius.
    pub fn scale(&self) -> f64 {
        f64::from(self.radius) / REFERENCE_RADIUS
    }

    /// Hand lengths at this radius.
    pub fn hand_lengths(&self) -> HandLengths {
        HandLengths {
            hour: self.scaled(80),
            minute: self.scaled(110),
            second: self.scaled(120),
        }
    }

    /// A hand width designed for the reference radius, scaled to this one.
    pub fn hand_width(&self, reference_width: u32) -> u32 {
        self.scaled(reference_width).max(1)
    }

    /// Radius of the center hub.
    pub fn hub_radius(&self, slim: bool) -> u32 {
        self.scaled(if slim { 6 } else { 8 }).max(4)
    }

    /// Outline width of the center hub.
    pub fn hub_outline_width(&self) -> u32 {
        self.scaled(2).max(1)
    }

    /// Point `distance` away from the center along a hand angle.
    pub fn point_at(&self, hand_angle: f64, distance: f64) -> Point {
        let direction = canvas_direction(hand_angle).to_radians();
        Point::new(
            self.center.x + distance * direction.cos(),
            self.center.y - distance * direction.sin(),
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scaled(&self, reference: u32) -> u32 {
        (f64::from(reference) * self.scale()) as u32
    }
}
