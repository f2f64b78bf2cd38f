//! Persistent settings store with change tracking.
//!
//! Wraps the typed [`Settings`](crate::config::Settings) in a key-value
//! interface backed by a flat JSON file, reporting every change as a
//! [`ConfigChange`].

mod changes;
mod store;

#[cfg(test)]
mod tests;

pub use changes::{ConfigChange, ConfigError};
pub use store::ClockConfig;
