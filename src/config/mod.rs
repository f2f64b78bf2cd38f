//! Configuration schema definitions.
//!
//! Defines the settings the clock persists between runs. The settings file
//! is a flat JSON object; every key has a built-in default so partial or
//! missing files load cleanly.

mod paths;
mod settings;


pub use paths::ConfigPaths;
pub use settings::{Position, Settings, Size};
