// File: tests/cli_commands.rs
use deskclock::cli::{Command, run_alarm_command};
use deskclock::config::{LoadOutcome, Settings};
use deskclock::context::{AppContext, TestContext};
use std::fs;

fn add(ctx: &TestContext, time: &str) -> anyhow::Result<()> {
    run_alarm_command(ctx, &Command::AddAlarm(time.to_string()))
}

fn remove(ctx: &TestContext, time: &str) -> anyhow::Result<()> {
    run_alarm_command(ctx, &Command::RemoveAlarm(time.to_string()))
}

#[test]
fn test_add_persists_alarm() {
    let ctx = TestContext::new();

    add(&ctx, "07:30").unwrap();
    add(&ctx, "06:15").unwrap();
    add(&ctx, "07:30").unwrap();

    let saved = Settings::load(&ctx).unwrap();
    assert_eq!(saved.alarms.to_strings(), vec!["06:15", "07:30"]);
}

#[test]
fn test_remove_missing_alarm_leaves_set_alone() {
    let ctx = TestContext::new();
    add(&ctx, "07:30").unwrap();

    remove(&ctx, "08:00").unwrap();
    assert_eq!(Settings::load(&ctx).unwrap().alarms.to_strings(), vec!["07:30"]);

    remove(&ctx, "07:30").unwrap();
    assert!(Settings::load(&ctx).unwrap().alarms.is_empty());
}

#[test]
fn test_bad_time_is_rejected_without_writing() {
    let ctx = TestContext::new();
    add(&ctx, "07:30").unwrap();
    let path = ctx.get_config_file_path().unwrap();
    let before = fs::read_to_string(&path).unwrap();

    assert!(add(&ctx, "7:30").is_err());
    assert!(remove(&ctx, "24:00").is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_broken_file_is_never_modified() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    let broken = "{ \"alarms\": [\"07:00\"";
    fs::write(&path, broken).unwrap();

    let err = add(&ctx, "08:00").unwrap_err();
    assert!(err.to_string().starts_with("Refusing to modify settings"));
    assert!(remove(&ctx, "07:00").is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);

    // Listing is read-only and still works.
    run_alarm_command(&ctx, &Command::ListAlarms).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_first_command_creates_settings_file() {
    let ctx = TestContext::new();
    run_alarm_command(&ctx, &Command::ListAlarms).unwrap();

    let (settings, outcome) = Settings::load_or_default(&ctx);
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert!(settings.alarms.is_empty());
}
