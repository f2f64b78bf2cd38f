use std::{path::PathBuf, time::Instant};

use serde_json::Value;

/// Represents a change to one settings key.
///
/// This struct captures all relevant information about a configuration change,
/// including what changed and when it changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigChange {
    /// Settings key that changed (e.g., "current_theme").
    pub key: String,
    /// The previous value of the key, if it had one.
    pub old_value: Option<Value>,
    /// The new value of the key.
    pub new_value: Value,
    /// Timestamp when the change occurred.
    pub timestamp: Instant,
}

impl ConfigChange {
    /// Creates a new configuration change record.
    ///
    /// # Arguments
    /// * `key` - Settings key that changed
    /// * `old_value` - Previous value, `None` if the key was absent
    /// * `new_value` - Value now stored under the key
    pub fn new(key: String, old_value: Option<Value>, new_value: Value) -> Self {
        Self {
            key,
            old_value,
            new_value,
            timestamp: Instant::now(),
        }
    }
}

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The key is not usable as a settings key.
    #[error("invalid settings key '{0}'")]
    InvalidKey(String),

    /// The value does not fit the type the key expects.
    #[error("invalid value for '{key}': {details}")]
    InvalidValue {
        /// Key the value was meant for
        key: String,
        /// Why the value was rejected
        details: String,
    },

    /// Error occurred while serializing configuration
    #[error("failed to serialize {content_type}: {details}")]
    SerializationError {
        /// Type of content being serialized (e.g., "settings")
        content_type: String,
        /// Serialization error details
        details: String,
    },

    /// Error occurred while persisting configuration to disk
    #[error("failed to persist config to '{path}': {details}")]
    PersistenceError {
        /// Path where persistence failed
        path: PathBuf,
        /// Error details from the persistence operation
        details: String,
    },
}
