use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, instrument, warn};

use crate::{
    ClockError, Result,
    render::{LineCap, Shape},
    settings_panel::SettingsView,
};

use super::{Frame, Presenter, WINDOW_TITLE, settings_lines};

/// Height reserved above the canvas for the digital readout.
const LABEL_BAND: u32 = 40;

/// Rewrites an SVG file on every frame.
///
/// The file is written next to its final path and renamed into place, so
/// readers never see a partial document.
#[derive(Debug, Clone)]
pub struct SvgPresenter {
    path: PathBuf,
}

impl SvgPresenter {
    /// Creates a presenter writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File the frames are written to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Presenter for SvgPresenter {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let document = render_svg(frame).map_err(|e| ClockError::present(e, &self.path))?;

        let staging = self.path.with_extension("svg.tmp");
        fs::write(&staging, document).map_err(|e| ClockError::present(e, &self.path))?;
        fs::rename(&staging, &self.path).map_err(|e| ClockError::present(e, &self.path))?;

        Ok(())
    }

    fn alert(&mut self, title: &str, message: &str) {
        warn!(title, message, "Input rejected");
    }

    fn show_settings(&mut self, view: &SettingsView) {
        for line in settings_lines(view) {
            info!("{line}");
        }
    }

    fn teardown(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Serializes a frame as a standalone SVG document the size of the window.
///
/// # Errors
/// Returns `fmt::Error` if formatting fails.
pub fn render_svg(frame: &Frame<'_>) -> std::result::Result<String, std::fmt::Error> {
    let palette = frame.theme.palette();
    let window = frame.window.size;
    let canvas = frame.window.clock_size;
    let offset_x = window.width.saturating_sub(canvas.width) / 2;
    let offset_y = window.height.saturating_sub(canvas.height).min(LABEL_BAND + 10);

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = window.width,
        h = window.height,
    )?;
    writeln!(svg, "  <title>{}</title>", escape(WINDOW_TITLE))?;
    writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        palette.background
    )?;

    if let Some(label) = frame.digital {
        writeln!(
            svg,
            r#"  <text x="{}" y="{}" font-family="Arial" font-size="14" font-weight="bold" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            window.width / 2,
            LABEL_BAND / 2,
            palette.digital_text,
            escape(label),
        )?;
    }

    writeln!(svg, r#"  <g transform="translate({offset_x} {offset_y})">"#)?;
    if let Some(background) = frame.canvas.background() {
        writeln!(
            svg,
            r#"    <rect width="{}" height="{}" fill="{background}"/>"#,
            canvas.width, canvas.height
        )?;
    }

    for item in frame.canvas.items() {
        match &item.shape {
            Shape::Oval(oval) => {
                let fill = oval
                    .fill
                    .map_or_else(|| "none".to_string(), |c| c.to_string());
                writeln!(
                    svg,
                    r#"    <circle cx="{}" cy="{}" r="{}" fill="{fill}" stroke="{}" stroke-width="{}"/>"#,
                    oval.center.x, oval.center.y, oval.radius, oval.outline, oval.width,
                )?;
            }
            Shape::Line(line) => {
                let cap = match line.cap {
                    LineCap::Butt => "butt",
                    LineCap::Round => "round",
                };
                writeln!(
                    svg,
                    r#"    <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-linecap="{cap}"/>"#,
                    line.from.x, line.from.y, line.to.x, line.to.y, line.color, line.width,
                )?;
            }
            Shape::Text(text) => {
                writeln!(
                    svg,
                    r#"    <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                    text.at.x,
                    text.at.y,
                    escape(&text.family),
                    text.size,
                    text.weight,
                    text.color,
                    escape(&text.content),
                )?;
            }
        }
    }

    writeln!(svg, "  </g>")?;
    writeln!(svg, "</svg>")?;

    Ok(svg)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
