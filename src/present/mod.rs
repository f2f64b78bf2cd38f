//! Presenters turn the renderer's display list into visible output.
//!
//! The shell hands a [`Frame`] to its [`Presenter`] after every tick and
//! every handled command. Two presenters ship: [`TerminalPresenter`] draws
//! the clock with true-color half blocks, [`SvgPresenter`] rewrites an SVG
//! file.

mod raster;
mod svg;
mod terminal;

#[cfg(test)]
mod tests;

pub use raster::{Raster, TextOverlay};
pub use svg::{SvgPresenter, render_svg};
pub use terminal::TerminalPresenter;

use crate::{
    Result, config::Size, render::DisplayList, settings_panel::SettingsView, theme::Theme,
};

/// Title of the clock window.
pub const WINDOW_TITLE: &str = "Analog Clock";

/// Window-level state that is not part of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// Outer window size
    pub size: Size,
    /// Canvas size
    pub clock_size: Size,
    /// Whether the window is pinned above others
    pub always_on_top: bool,
}

/// Everything a presenter needs to show one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Face and hands
    pub canvas: &'a DisplayList,
    /// Digital readout, `None` when hidden
    pub digital: Option<&'a str>,
    /// Theme the canvas was drawn with
    pub theme: &'a Theme,
    /// Window geometry and flags
    pub window: WindowState,
}

/// Output sink of the shell.
pub trait Presenter {
    /// Shows a frame.
    ///
    /// # Errors
    /// Returns `ClockError::Present` or `ClockError::Io` when the output
    /// cannot be written.
    fn present(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Tells the user something went wrong with their input.
    fn alert(&mut self, title: &str, message: &str);

    /// Shows the settings window.
    fn show_settings(&mut self, view: &SettingsView);

    /// Releases the output. Called once when the shell stops.
    ///
    /// # Errors
    /// Returns `ClockError::Io` if restoring the output fails.
    fn teardown(&mut self) -> Result<()>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        (**self).present(frame)
    }

    fn alert(&mut self, title: &str, message: &str) {
        (**self).alert(title, message);
    }

    fn show_settings(&mut self, view: &SettingsView) {
        (**self).show_settings(view);
    }

    fn teardown(&mut self) -> Result<()> {
        (**self).teardown()
    }
}

/// Lines describing the settings window, shared by the presenters.
pub fn settings_lines(view: &SettingsView) -> Vec<String> {
    let check = |on: bool| if on { "x" } else { " " };
    let presets = view
        .presets
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        "Settings".to_string(),
        format!("  theme: {} [{}]", view.current_theme, view.themes.join(", ")),
        format!("  [{}] always on top", check(view.always_on_top)),
        format!("  [{}] digital clock", check(view.show_digital_clock)),
        format!("  size: {}px (presets: {presets}; custom 200-800)", view.clock_size),
    ]
}
