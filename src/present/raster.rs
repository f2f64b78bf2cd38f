#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use crate::{
    config::Size,
    render::{DisplayList, LineCap, Shape},
    theme::Color,
};

/// Text left on top of the pixels, positioned in raster coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOverlay {
    /// Center column
    pub x: i32,
    /// Center row
    pub y: i32,
    /// The text
    pub content: String,
    /// Text color
    pub color: Color,
}

/// A fixed-size pixel grid with integer drawing primitives.
///
/// Writes outside the grid are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    overlays: Vec<TextOverlay>,
}

impl Raster {
    /// Creates a grid filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
            overlays: Vec::new(),
        }
    }

    /// Rasterizes a display list drawn for a canvas of `canvas` pixels,
    /// shrinking it by `scale`.
    pub fn from_display_list(list: &DisplayList, canvas: Size, scale: f64) -> Self {
        let width = (f64::from(canvas.width) * scale).round().max(1.0) as u32;
        let height = (f64::from(canvas.height) * scale).round().max(1.0) as u32;
        let background = list.background().unwrap_or(Color::rgb(0, 0, 0));
        let mut raster = Self::new(width, height, background);

        let at = |v: f64| (v * scale).round() as i32;
        let stroke = |w: u32| ((f64::from(w) * scale).round() as i32).max(1);
        // Strokes wider than the grid cannot add pixels.
        let reach = width.saturating_add(height).min(i32::MAX as u32) as i32;
        let extent = f64::from(width.max(height));

        for item in list.items() {
            match &item.shape {
                Shape::Oval(oval) => {
                    let (cx, cy, r) = (at(oval.center.x), at(oval.center.y), at(oval.radius));
                    if let Some(fill) = oval.fill {
                        raster.fill_circle(cx, cy, r, fill);
                    }
                    for ring in 0..stroke(oval.width).min(reach) {
                        raster.circle_outline(cx, cy, r - ring, oval.outline);
                    }
                }
                Shape::Line(line) => {
                    let thickness = stroke(line.width).min(reach);
                    let margin = f64::from(thickness);
                    let from = (line.from.x * scale, line.from.y * scale);
                    let to = (line.to.x * scale, line.to.y * scale);
                    if let Some((a, b)) = clip_segment(from, to, -margin, extent + margin) {
                        let (x0, y0) = (a.0.round() as i32, a.1.round() as i32);
                        let (x1, y1) = (b.0.round() as i32, b.1.round() as i32);
                        raster.thick_line(x0, y0, x1, y1, thickness, line.color);
                    }
                    if line.cap == LineCap::Round && thickness > 1 {
                        let (x0, y0) = (at(line.from.x), at(line.from.y));
                        let (x1, y1) = (at(line.to.x), at(line.to.y));
                        raster.fill_circle(x0, y0, thickness / 2, line.color);
                        raster.fill_circle(x1, y1, thickness / 2, line.color);
                    }
                }
                Shape::Text(text) => raster.overlays.push(TextOverlay {
                    x: at(text.at.x),
                    y: at(text.at.y),
                    content: text.content.clone(),
                    color: text.color,
                }),
            }
        }

        raster
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at a pixel, `None` outside the grid.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x.into(), y.into()).map(|i| self.pixels[i])
    }

    /// Text collected while rasterizing, in draw order.
    pub fn overlays(&self) -> &[TextOverlay] {
        &self.overlays
    }

    /// Sets one pixel.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.put(x.into(), y.into(), color);
    }

    /// One-pixel Bresenham line.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Line of `thickness` pixels, offset across its minor axis.
    pub fn thick_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32, color: Color) {
        let shallow = (i64::from(x1) - i64::from(x0)).abs() >= (i64::from(y1) - i64::from(y0)).abs();
        for t in -(thickness - 1) / 2..=thickness / 2 {
            if shallow {
                self.line(x0, y0.saturating_add(t), x1, y1.saturating_add(t), color);
            } else {
                self.line(x0.saturating_add(t), y0, x1.saturating_add(t), y1, color);
            }
        }
    }

    /// Filled disc. Only rows and columns inside the grid are visited.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color) {
        if r < 0 {
            return;
        }
        let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(r));
        let last_row = i64::from(self.height) - 1;
        let last_col = i64::from(self.width) - 1;

        for y in (cy - r).max(0)..=(cy + r).min(last_row) {
            let dy = y - cy;
            let dx = ((r * r - dy * dy) as f64).sqrt() as i64;
            for x in (cx - dx).max(0)..=(cx + dx).min(last_col) {
                self.put(x, y, color);
            }
        }
    }

    /// One-pixel circle outline, midpoint algorithm. Circles that miss the
    /// grid are skipped.
    pub fn circle_outline(&mut self, cx: i32, cy: i32, r: i32, color: Color) {
        if r < 0 || !self.touches(cx.into(), cy.into(), r.into()) {
            return;
        }
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let (mut x, mut y) = (i64::from(r), 0);
        let mut d = 1 - x;

        while x >= y {
            for (px, py) in [
                (x, y),
                (-x, y),
                (x, -y),
                (-x, -y),
                (y, x),
                (-y, x),
                (y, -x),
                (-y, -x),
            ] {
                self.put(cx + px, cy + py, color);
            }
            y += 1;
            if d <= 0 {
                d += 2 * y + 1;
            } else {
                x -= 1;
                d += 2 * (y - x) + 1;
            }
        }
    }

    /// Whether a circle outline passes through the grid.
    fn touches(&self, cx: i64, cy: i64, r: i64) -> bool {
        let last_col = i64::from(self.width) - 1;
        let last_row = i64::from(self.height) - 1;
        let near = ((cx.clamp(0, last_col) - cx) as f64).hypot((cy.clamp(0, last_row) - cy) as f64);
        let far = (cx.abs().max((last_col - cx).abs()) as f64)
            .hypot(cy.abs().max((last_row - cy).abs()) as f64);
        let r = r as f64;
        near <= r + 1.0 && far >= r - 1.0
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// Clips a segment to the square `[low, high]` on both axes (Liang-Barsky).
/// Returns `None` when nothing of it lies inside.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    low: f64,
    high: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, from.0 - low),
        (dx, high - from.0),
        (-dy, from.1 - low),
        (dy, high - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > exit {
                return None;
            }
            enter = enter.max(t);
        } else {
            if t < enter {
                return None;
            }
            exit = exit.min(t);
        }
    }

    Some((
        (from.0 + enter * dx, from.1 + enter * dy),
        (from.0 + exit * dx, from.1 + exit * dy),
    ))
}
