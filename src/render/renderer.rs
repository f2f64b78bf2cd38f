use tracing::{debug, instrument};

use crate::{
    ClockError, Result,
    config_store::ClockConfig,
    theme::{FaceFeatures, Theme},
    time_source::ClockReading,
};

use super::{FaceGeometry, Layer, Line, LineCap, Oval, Shape, Surface, Text};

/// Draws the clock onto a [`Surface`].
///
/// The face is drawn once per theme or size change; the hands are cleared
/// and redrawn every tick. Every drawing call fails with
/// [`ClockError::NotInitialized`] until [`initialize`](Self::initialize) has
/// handed over a surface.
#[derive(Debug)]
pub struct Renderer<S> {
    surface: Option<S>,
    geometry: Option<FaceGeometry>,
    face_rendered: bool,
}

impl<S: Surface> Default for Renderer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> Renderer<S> {
    /// Creates an uninitialized renderer.
    pub fn new() -> Self {
        Self {
            surface: None,
            geometry: None,
            face_rendered: false,
        }
    }

    /// Takes ownership of the surface and reads center and radius from the
    /// settings.
    pub fn initialize(&mut self, surface: S, config: &ClockConfig) {
        self.surface = Some(surface);
        self.geometry = Some(FaceGeometry::from_config(config));
        self.face_rendered = false;
    }

    /// Re-reads center and radius after a size change. The face must be
    /// rendered again before hands can be drawn.
    ///
    /// # Errors
    /// Returns `ClockError::NotInitialized` before [`initialize`](Self::initialize).
    pub fn resize(&mut self, config: &ClockConfig) -> Result<()> {
        if self.surface.is_none() {
            return Err(not_initialized());
        }
        self.geometry = Some(FaceGeometry::from_config(config));
        self.face_rendered = false;
        Ok(())
    }

    /// Whether a surface has been handed over.
    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    /// Whether the face is on the surface.
    pub fn face_rendered(&self) -> bool {
        self.face_rendered
    }

    /// Current geometry, if initialized.
    pub fn geometry(&self) -> Option<FaceGeometry> {
        self.geometry
    }

    /// The surface, if initialized.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Draws the static face: outline, glow rings, numerals, hour marks and
    /// minute marks, in that order.
    ///
    /// # Errors
    /// Returns `ClockError::NotInitialized` before [`initialize`](Self::initialize).
    #[instrument(skip_all, fields(theme = theme.name()))]
    pub fn render_face(&mut self, theme: &Theme) -> Result<()> {
        let (surface, geometry) = self.parts()?;
        let palette = theme.palette();
        let slim = theme.has(FaceFeatures::SLIM_MARKS);
        let radius = f64::from(geometry.radius);

        surface.set_background(palette.canvas);

        surface.draw(
            Layer::Face,
            Shape::Oval(Oval {
                center: geometry.center,
                radius,
                fill: Some(palette.face),
                outline: palette.outline,
                width: geometry.outline_width(),
            }),
        );

        if theme.has(FaceFeatures::GLOW_RING) {
            for ring in 0..geometry.glow_rings() {
                surface.draw(
                    Layer::Face,
                    Shape::Oval(Oval {
                        center: geometry.center,
                        radius: radius + f64::from(ring),
                        fill: None,
                        outline: palette.outline,
                        width: 1,
                    }),
                );
            }
        }

        let numeral_distance = geometry.numeral_distance();
        let numeral_size = geometry.numeral_size(slim);
        for hour in 1..=12u32 {
            surface.draw(
                Layer::Face,
                Shape::Text(Text {
                    at: geometry.point_at(f64::from(hour * 30), numeral_distance),
                    content: hour.to_string(),
                    family: theme.font().family.clone(),
                    size: numeral_size,
                    weight: theme.font().weight,
                    color: palette.numerals,
                }),
            );
        }

        let hour_mark = geometry.hour_mark(slim);
        for hour in 0..12u32 {
            let angle = f64::from(hour * 30);
            surface.draw(
                Layer::Face,
                Shape::Line(Line {
                    from: geometry.point_at(angle, radius - f64::from(hour_mark.length)),
                    to: geometry.point_at(angle, radius - f64::from(hour_mark.inset)),
                    color: palette.marks,
                    width: hour_mark.width,
                    cap: LineCap::Butt,
                }),
            );
        }

        if theme.has(FaceFeatures::MINUTE_TICKS) {
            let minute_mark = geometry.minute_mark();
            for minute in (0..60u32).filter(|m| m % 5 != 0) {
                let angle = f64::from(minute * 6);
                surface.draw(
                    Layer::Face,
                    Shape::Line(Line {
                        from: geometry.point_at(angle, radius - f64::from(minute_mark.length)),
                        to: geometry.point_at(angle, radius - f64::from(minute_mark.inset)),
                        color: palette.marks,
                        width: minute_mark.width,
                        cap: LineCap::Butt,
                    }),
                );
            }
        }

        self.face_rendered = true;
        debug!("Rendered clock face");
        Ok(())
    }

    /// Draws the hour, minute and second hands and the center hub.
    ///
    /// Each hand goes through the theme's effect.
    ///
    /// # Errors
    /// Returns `ClockError::NotInitialized` before [`initialize`](Self::initialize)
    /// and `ClockError::FaceNotRendered` after a clear or resize until the
    /// face is drawn again.
    pub fn render_hands(&mut self, reading: ClockReading, theme: &Theme) -> Result<()> {
        if self.surface.is_some() && !self.face_rendered {
            return Err(ClockError::FaceNotRendered);
        }
        let (surface, geometry) = self.parts()?;
        let palette = theme.palette();
        let angles = reading.angles();
        let lengths = geometry.hand_lengths();
        let widths = theme.hands();

        let hands = [
            (angles.hour, lengths.hour, widths.hour, palette.hour_hand),
            (angles.minute, lengths.minute, widths.minute, palette.minute_hand),
            (angles.second, lengths.second, widths.second, palette.second_hand),
        ];

        for (angle, length, width, color) in hands {
            let tip = geometry.point_at(angle, f64::from(length));
            theme
                .effect()
                .apply(geometry.hand_width(width), |stroke_width| {
                    surface.draw(
                        Layer::Hands,
                        Shape::Line(Line {
                            from: geometry.center,
                            to: tip,
                            color,
                            width: stroke_width,
                            cap: LineCap::Round,
                        }),
                    );
                });
        }

        surface.draw(
            Layer::Hands,
            Shape::Oval(Oval {
                center: geometry.center,
                radius: f64::from(geometry.hub_radius(theme.has(FaceFeatures::SLIM_MARKS))),
                fill: Some(palette.hub),
                outline: palette.hub,
                width: geometry.hub_outline_width(),
            }),
        );

        Ok(())
    }

    /// Removes the hands and hub. Calling it repeatedly is harmless.
    ///
    /// # Errors
    /// Returns `ClockError::NotInitialized` before [`initialize`](Self::initialize).
    pub fn clear_hands(&mut self) -> Result<()> {
        let (surface, _) = self.parts()?;
        surface.delete(Layer::Hands);
        Ok(())
    }

    /// Removes everything, face included.
    ///
    /// # Errors
    /// Returns `ClockError::NotInitialized` before [`initialize`](Self::initialize).
    pub fn clear_all(&mut self) -> Result<()> {
        let (surface, _) = self.parts()?;
        surface.clear();
        self.face_rendered = false;
        Ok(())
    }

    fn parts(&mut self) -> Result<(&mut S, FaceGeometry)> {
        match (self.surface.as_mut(), self.geometry) {
            (Some(surface), Some(geometry)) => Ok((surface, geometry)),
            _ => Err(not_initialized()),
        }
    }
}

fn not_initialized() -> ClockError {
    ClockError::NotInitialized {
        component: "renderer",
    }
}
