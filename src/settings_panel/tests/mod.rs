//! Unit tests for the settings panel
//! In-memory configuration only.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use serde_json::json;

use crate::{
    config::{Position, Size},
    config_store::ClockConfig,
    settings_panel::{
        SettingsError, SettingsPanel, SettingsView, SizeInputError, SizePreset, parse_custom_size,
    },
};

#[test]
fn presets_map_to_pixels() {
    let pixels: Vec<u32> = SizePreset::ALL.iter().map(|p| p.pixels()).collect();

    assert_eq!(pixels, vec![250, 350, 450, 550]);
    assert_eq!("XLarge".parse::<SizePreset>(), Ok(SizePreset::XLarge));
    assert!("huge".parse::<SizePreset>().is_err());
}

#[test]
fn custom_size_bounds_are_inclusive() {
    assert_eq!(parse_custom_size("200"), Ok(200));
    assert_eq!(parse_custom_size(" 800 "), Ok(800));
    assert_eq!(
        parse_custom_size("199"),
        Err(SizeInputError::OutOfRange { size: 199 })
    );
    assert_eq!(
        parse_custom_size("-5"),
        Err(SizeInputError::OutOfRange { size: -5 })
    );
    assert!(matches!(
        parse_custom_size("big"),
        Err(SizeInputError::NotANumber { .. })
    ));
    assert!(matches!(
        parse_custom_size("300.5"),
        Err(SizeInputError::NotANumber { .. })
    ));
}

#[test]
fn size_900_is_rejected_without_changes() {
    let mut config = ClockConfig::in_memory();
    let before = config.settings().clone();

    let result = SettingsPanel::new(&mut config).apply_custom_size("900");

    let Err(SettingsError::Size(error)) = result else {
        panic!("expected a size error, got {result:?}");
    };
    assert_eq!(error, SizeInputError::OutOfRange { size: 900 });
    assert_eq!(error.title(), "Range error");
    assert_eq!(config.settings(), &before);
}

#[test]
fn apply_size_keeps_geometry_consistent() {
    let mut config = ClockConfig::in_memory();

    let changes = SettingsPanel::new(&mut config).apply_size(450).unwrap();

    assert_eq!(changes.len(), 4);
    assert_eq!(config.window_size(), Size::new(500, 550));
    assert_eq!(config.clock_size(), Size::square(450));
    assert_eq!(config.center_position(), Position { x: 225, y: 225 });
    assert_eq!(config.radius(), 200);
}

#[test]
fn odd_sizes_floor() {
    let mut config = ClockConfig::in_memory();

    SettingsPanel::new(&mut config).apply_custom_size("301").unwrap();

    assert_eq!(config.center_position(), Position { x: 150, y: 150 });
    assert_eq!(config.radius(), 125);
}

#[test]
fn reset_restores_defaults() {
    let mut config = ClockConfig::in_memory();
    {
        let mut panel = SettingsPanel::new(&mut config);
        panel.select_theme("Neon").unwrap();
        panel.set_always_on_top(true).unwrap();
        panel.set_show_digital(false).unwrap();
        panel.apply_preset(SizePreset::Small).unwrap();
    }

    let changes = SettingsPanel::new(&mut config).reset().unwrap();

    assert_eq!(changes.len(), 7);
    assert_eq!(config.current_theme(), "Modern");
    assert!(!config.always_on_top());
    assert!(config.show_digital_clock());
    assert_eq!(config.window_size(), Size::new(400, 450));
    assert_eq!(config.clock_size(), Size::square(350));
    assert_eq!(config.center_position(), Position { x: 175, y: 175 });
    assert_eq!(config.radius(), 150);
}

#[test]
fn toggles_record_changes() {
    let mut config = ClockConfig::in_memory();

    let change = SettingsPanel::new(&mut config)
        .set_always_on_top(true)
        .unwrap();

    assert_eq!(change.key, "always_on_top");
    assert_eq!(change.old_value, None);
    assert_eq!(change.new_value, json!(true));
    assert!(config.always_on_top());
}

#[test]
fn view_reflects_config() {
    let mut config = ClockConfig::in_memory();
    SettingsPanel::new(&mut config)
        .apply_preset(SizePreset::Large)
        .unwrap();

    let view = SettingsView::from_config(&config, vec!["Modern".to_string()]);

    assert_eq!(view.clock_size, 450);
    assert_eq!(view.current_theme, "Modern");
    assert!(!view.always_on_top);
    assert_eq!(view.presets.len(), 4);
}
