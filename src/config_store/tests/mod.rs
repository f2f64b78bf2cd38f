//! Unit tests for config_store module
//! No filesystem, timing, or external dependencies.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};

use crate::config_store::{ClockConfig, ConfigChange, ConfigError};

#[test]
fn config_change_new() {
    let change = ConfigChange::new("radius".to_string(), Some(json!(150)), json!(200));

    assert_eq!(change.key, "radius");
    assert_eq!(change.old_value, Some(json!(150)));
    assert_eq!(change.new_value, json!(200));
    assert!(change.timestamp.elapsed().as_secs() < 1);
}

#[test]
fn set_then_get_returns_value() {
    let mut config = ClockConfig::in_memory();

    config.set("current_theme", json!("Dark")).unwrap();
    config.set("clock_size", json!({"width": 450, "height": 450})).unwrap();

    assert_eq!(config.get("current_theme"), Some(json!("Dark")));
    assert_eq!(config.current_theme(), "Dark");
    assert_eq!(config.clock_size().width, 450);
}

#[test]
fn set_reports_previous_value() {
    let mut config = ClockConfig::in_memory();

    let change = config.set("radius", json!(100)).unwrap();

    assert_eq!(change.old_value, Some(json!(150)));
    assert_eq!(change.new_value, json!(100));
}

#[test]
fn set_rejects_mistyped_value() {
    let mut config = ClockConfig::in_memory();

    let result = config.set("radius", json!("huge"));

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    assert_eq!(config.radius(), 150);
}

#[test]
fn set_rejects_empty_key() {
    let mut config = ClockConfig::in_memory();

    assert!(matches!(
        config.set("  ", json!(true)),
        Err(ConfigError::InvalidKey(_))
    ));
}

#[test]
fn unknown_keys_are_kept() {
    let mut config = ClockConfig::in_memory();

    let change = config.set("accent", json!("#ff0000")).unwrap();

    assert_eq!(change.old_value, None);
    assert_eq!(config.get("accent"), Some(json!("#ff0000")));
    assert_eq!(config.settings().extra.len(), 1);
}

#[test]
fn always_on_top_absent_until_set() {
    let mut config = ClockConfig::in_memory();

    assert_eq!(config.get("always_on_top"), None);
    assert_eq!(config.get_or("always_on_top", Value::Bool(false)), json!(false));
    assert!(!config.always_on_top());

    config.set("always_on_top", json!(true)).unwrap();

    assert_eq!(config.get("always_on_top"), Some(json!(true)));
    assert!(config.always_on_top());
}

#[test]
fn in_memory_save_is_noop() {
    let config = ClockConfig::in_memory();

    assert!(config.path().is_none());
    assert!(config.save().is_ok());
}

#[test]
fn schema_lists_settings_keys() {
    let schema = serde_json::to_value(ClockConfig::schema()).unwrap();
    let properties = schema["properties"].as_object().unwrap();

    for key in [
        "default_theme",
        "current_theme",
        "window_size",
        "clock_size",
        "center_position",
        "radius",
        "save_settings",
        "show_digital_clock",
    ] {
        assert!(properties.contains_key(key), "schema is missing {key}");
    }
}
