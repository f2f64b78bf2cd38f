use crate::theme::Color;

use super::{Layer, Shape, Surface};

/// A shape and the layer it was drawn on.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Layer the shape belongs to
    pub layer: Layer,
    /// The shape
    pub shape: Shape,
}

/// Retained, in-memory [`Surface`].
///
/// Keeps shapes in draw order, bottom first. Presenters walk the list to
/// produce visible output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    background: Option<Color>,
    items: Vec<Item>,
}

impl DisplayList {
    /// Creates an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Background color, if one was set.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// All items, bottom first.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Shapes on one layer, bottom first.
    pub fn shapes_on(&self, layer: Layer) -> impl Iterator<Item = &Shape> {
        self.items
            .iter()
            .filter(move |item| item.layer == layer)
            .map(|item| &item.shape)
    }

    /// Number of shapes on one layer.
    pub fn count_on(&self, layer: Layer) -> usize {
        self.shapes_on(layer).count()
    }

    /// Total number of shapes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Surface for DisplayList {
    fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn draw(&mut self, layer: Layer, shape: Shape) {
        self.items.push(Item { layer, shape });
    }

    fn delete(&mut self, layer: Layer) {
        self.items.retain(|item| item.layer != layer);
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
