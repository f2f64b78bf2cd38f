use crate::theme::{Color, FontWeight};

/// A point on the canvas, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Group a drawn shape belongs to, so groups can be cleared independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Static clock face: circle, numerals, marks
    Face,
    /// Hands and hub, redrawn every tick
    Hands,
}

/// Shape of a line's ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Square ends flush with the endpoints
    #[default]
    Butt,
    /// Rounded ends extending half the width past the endpoints
    Round,
}

/// A circle, optionally filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Oval {
    /// Center of the circle
    pub center: Point,
    /// Radius in pixels
    pub radius: f64,
    /// Interior color, `None` for an outline only
    pub fill: Option<Color>,
    /// Outline color
    pub outline: Color,
    /// Outline width in pixels
    pub width: u32,
}

/// A straight stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Start point
    pub from: Point,
    /// End point
    pub to: Point,
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: u32,
    /// End caps
    pub cap: LineCap,
}

/// A run of text centered on a point.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Center of the text
    pub at: Point,
    /// The text itself
    pub content: String,
    /// Font family
    pub family: String,
    /// Font size in points
    pub size: u32,
    /// Font weight
    pub weight: FontWeight,
    /// Text color
    pub color: Color,
}

/// Anything a surface can draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A circle
    Oval(Oval),
    /// A line
    Line(Line),
    /// Text
    Text(Text),
}

/// Drawing target of the renderer.
///
/// Shapes are retained and tagged with a [`Layer`]; deleting a layer removes
/// exactly the shapes drawn on it.
pub trait Surface {
    /// Sets the color behind everything.
    fn set_background(&mut self, color: Color);

    /// Adds a shape on top of everything drawn so far.
    fn draw(&mut self, layer: Layer, shape: Shape);

    /// Removes every shape on `layer`.
    fn delete(&mut self, layer: Layer);

    /// Removes every shape.
    fn clear(&mut self);
}
