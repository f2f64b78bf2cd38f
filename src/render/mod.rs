//! Theme-driven clock rendering.
//!
//! The [`Renderer`] turns a theme, the face geometry and a clock reading
//! into draw calls against a [`Surface`]. [`DisplayList`] is the retained
//! surface the application draws into; presenters make it visible.

mod display_list;
mod geometry;
mod renderer;
mod surface;


pub use display_list::{DisplayList, Item};
pub use geometry::{FaceGeometry, HandLengths, MarkSpec, REFERENCE_RADIUS};
pub use renderer::Renderer;
pub use surface::{Layer, Line, LineCap, Oval, Point, Shape, Surface, Text};
