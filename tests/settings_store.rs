// File: tests/settings_store.rs
mod common;

use common::{RecordingSink, t};
use deskclock::config::{LoadOutcome, Settings, Theme};
use deskclock::context::{AppContext, SharedContext, TestContext};
use deskclock::controller::{ClockController, SaveOutcome};
use std::fs;
use std::sync::Arc;

#[test]
fn test_missing_file_writes_defaults() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    assert!(!path.exists());

    let (settings, outcome) = Settings::load_or_default(&ctx);
    assert_eq!(outcome, LoadOutcome::CreatedDefaults);
    assert_eq!(settings, Settings::default());
    assert!(path.exists());

    let reloaded = Settings::load(&ctx).unwrap();
    assert_eq!(reloaded, Settings::default());
}

#[test]
fn test_missing_file_error_is_detected() {
    let ctx = TestContext::new();
    let err = Settings::load(&ctx).unwrap_err();
    assert!(Settings::is_missing_config_error(&err));

    let io_err = anyhow::Error::new(std::io::Error::from(std::io::ErrorKind::NotFound));
    assert!(Settings::is_missing_config_error(&io_err));
    assert!(!Settings::is_missing_config_error(&anyhow::anyhow!("bad json")));
}

#[test]
fn test_malformed_file_is_not_overwritten() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    let broken = "{ \"theme\": \"Light\", \"alarms\": [\"07:00\" ";
    fs::write(&path, broken).unwrap();

    let (settings, outcome) = Settings::load_or_default(&ctx);
    assert!(matches!(outcome, LoadOutcome::Fallback(_)));
    assert_eq!(settings, Settings::default());
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_controller_skips_save_after_fallback() {
    let ctx = Arc::new(TestContext::new());
    let path = ctx.get_config_file_path().unwrap();
    fs::write(&path, "not json").unwrap();

    let shared: SharedContext = ctx.clone();
    let mut controller = ClockController::new(shared, Arc::new(RecordingSink::default()), None);
    assert!(matches!(controller.load_outcome(), LoadOutcome::Fallback(_)));
    controller.add_alarm("06:00").unwrap();
    assert!(matches!(controller.save().unwrap(), SaveOutcome::Skipped(_)));
    assert!(matches!(controller.shutdown().unwrap(), SaveOutcome::Skipped(_)));

    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
}

#[test]
fn test_partial_file_fills_defaults_and_clamps() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    fs::write(
        &path,
        r#"{"theme": "Light", "opacity": 3.5, "alarms": ["22:10", "7:00", "06:30"]}"#,
    )
    .unwrap();

    let (settings, outcome) = Settings::load_or_default(&ctx);
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(settings.opacity, 1.0);
    assert_eq!(settings.color_theme, "blue");
    assert!(!settings.always_on_top);
    assert_eq!(settings.alarms.to_strings(), vec!["06:30", "22:10"]);
}

#[test]
fn test_shutdown_persists_alarms_and_settings() {
    let ctx = Arc::new(TestContext::new());
    let shared: SharedContext = ctx.clone();

    let mut controller =
        ClockController::new(shared.clone(), Arc::new(RecordingSink::default()), None);
    assert_eq!(controller.load_outcome(), &LoadOutcome::CreatedDefaults);
    controller.add_alarm("21:00").unwrap();
    controller.add_alarm("05:30").unwrap();
    controller.toggle_theme();
    controller.cycle_opacity();
    controller.toggle_always_on_top();
    controller.set_geometry("120x40".to_string());
    assert_eq!(controller.shutdown().unwrap(), SaveOutcome::Saved);

    let saved = Settings::load(ctx.as_ref()).unwrap();
    assert_eq!(saved.alarms.to_strings(), vec!["05:30", "21:00"]);
    assert_eq!(saved.theme, Theme::Light);
    assert_eq!(saved.opacity, 0.9);
    assert!(saved.always_on_top);
    assert_eq!(saved.geometry, "120x40");

    let json = fs::read_to_string(ctx.get_config_file_path().unwrap()).unwrap();
    assert!(json.contains("\"alarms\": ["));
    assert!(json.contains("\"05:30\""));

    let reopened = ClockController::new(shared, Arc::new(RecordingSink::default()), None);
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Loaded);
    assert!(reopened.alarms().contains(&t("21:00")));
}
