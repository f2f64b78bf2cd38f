//! Horloge - a themed analog and digital desk clock.
//!
//! The clock draws a face with hour marks, numerals and three hands, plus an
//! optional digital readout, and redraws the hands once a second. Frames go
//! to a true-color terminal or to an SVG file. The main pieces are:
//!
//! - Persisted settings with typed access and change records
//! - A catalog of built-in and user-defined themes
//! - A renderer that draws into any [`render::Surface`]
//! - A shell that owns the tick loop and reacts to settings commands
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use horloge::{
//!     config_store::ClockConfig,
//!     present::SvgPresenter,
//!     shell::ClockShell,
//!     theme::ThemeCatalog,
//!     time_source::SystemClock,
//! };
//!
//! let mut shell = ClockShell::new(SvgPresenter::new("clock.svg"), SystemClock::default());
//! shell.initialize(ClockConfig::in_memory(), ThemeCatalog::with_builtin_themes())?;
//! shell.tick()?;
//! # Ok::<(), horloge::ClockError>(())
//! ```

/// Core error types and result aliases.
pub mod core;

/// Settings schema and file locations.
pub mod config;

/// Settings store with change tracking and persistence.
pub mod config_store;

/// Themes, colors and the theme catalog.
pub mod theme;

/// Time sources and hand angles.
pub mod time_source;

/// Clock face and hand drawing.
pub mod render;

/// Making frames visible.
pub mod present;

/// Event publication between components.
pub mod events;

/// Settings panel logic.
pub mod settings_panel;

/// Lifecycle and tick loop.
pub mod shell;

/// Command-line interface.
pub mod cli;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{ClockError, Result};
