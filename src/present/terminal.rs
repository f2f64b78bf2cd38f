use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{
        self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
        Stylize,
    },
    terminal::{Clear, ClearType, SetTitle},
};
use tracing::debug;

use crate::{Result, settings_panel::SettingsView, theme::Color};

use super::{Frame, Presenter, Raster, WINDOW_TITLE, settings_lines};

const UPPER_HALF: char = '▀';

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

/// Draws frames on an ANSI terminal with 24-bit color.
///
/// Each character cell shows two canvas pixels stacked vertically: the
/// upper one as the foreground of `▀`, the lower one as the background.
/// Numerals are laid over the pixels as text. The digital readout sits on
/// the line above the face and the window title notes whether the clock is
/// pinned on top.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    columns: u32,
    notes: Vec<String>,
    started: bool,
}

impl<W: Write> TerminalPresenter<W> {
    /// Creates a presenter drawing the canvas `columns` characters wide.
    pub fn new(out: W, columns: u32) -> Self {
        Self {
            out,
            columns: columns.max(8),
            notes: Vec::new(),
            started: false,
        }
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn render(&self, frame: &Frame<'_>) -> std::io::Result<Vec<u8>> {
        let canvas = frame.window.clock_size;
        let scale = f64::from(self.columns) / f64::from(canvas.width.max(1));
        let raster = Raster::from_display_list(frame.canvas, canvas, scale);
        let cells = cells(&raster);
        let palette = frame.theme.palette();
        let width = raster.width() as usize;

        let mut buf = Vec::new();
        if !self.started {
            queue!(buf, cursor::Hide, Clear(ClearType::All))?;
        }

        let title = if frame.window.always_on_top {
            format!("{WINDOW_TITLE} (always on top)")
        } else {
            WINDOW_TITLE.to_string()
        };
        queue!(buf, cursor::MoveTo(0, 0), SetTitle(title))?;

        let label = frame.digital.unwrap_or("");
        queue!(
            buf,
            SetBackgroundColor(rgb(palette.background)),
            SetForegroundColor(rgb(palette.digital_text)),
            SetAttribute(Attribute::Bold),
            Print(format!("{label:^width$}")),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\r\n"),
        )?;

        for row in cells.chunks(width.max(1)) {
            for cell in row {
                queue!(
                    buf,
                    SetForegroundColor(rgb(cell.fg)),
                    SetBackgroundColor(rgb(cell.bg)),
                    Print(cell.ch),
                )?;
            }
            queue!(buf, ResetColor, Print("\r\n"))?;
        }

        queue!(buf, Clear(ClearType::FromCursorDown))?;
        for note in &self.notes {
            queue!(buf, Print(note), Print("\r\n"))?;
        }

        Ok(buf)
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let buf = self.render(frame)?;
        self.out.write_all(&buf)?;
        self.out.flush()?;
        self.started = true;
        Ok(())
    }

    fn alert(&mut self, title: &str, message: &str) {
        debug!(title, message, "Showing alert");
        self.notes = vec![format!("{}: {message}", title.red().bold())];
    }

    fn show_settings(&mut self, view: &SettingsView) {
        self.notes = settings_lines(view);
    }

    fn teardown(&mut self) -> Result<()> {
        if self.started {
            queue!(self.out, ResetColor, cursor::Show, Print("\r\n"))?;
            self.out.flush()?;
        }
        Ok(())
    }
}

fn rgb(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn cells(raster: &Raster) -> Vec<Cell> {
    let width = raster.width() as i32;
    let rows = raster.height().div_ceil(2) as i32;
    let black = Color::rgb(0, 0, 0);
    let mut cells = Vec::with_capacity((width * rows).max(0) as usize);

    for row in 0..rows {
        for col in 0..width {
            let top = raster.pixel(col, row * 2).unwrap_or(black);
            let bottom = raster.pixel(col, row * 2 + 1).unwrap_or(top);
            cells.push(Cell {
                ch: UPPER_HALF,
                fg: top,
                bg: bottom,
            });
        }
    }

    for overlay in raster.overlays() {
        let row = overlay.y / 2;
        let len = overlay.content.chars().count() as i32;
        let start = overlay.x - len / 2;
        for (offset, ch) in overlay.content.chars().enumerate() {
            let col = start + offset as i32;
            if (0..width).contains(&col) && (0..rows).contains(&row) {
                let index = (row * width + col) as usize;
                let under = cells[index].fg;
                cells[index] = Cell {
                    ch,
                    fg: overlay.color,
                    bg: under,
                };
            }
        }
    }

    cells
}
