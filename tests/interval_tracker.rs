// File: tests/interval_tracker.rs
use deskclock::model::display::{format_countdown, format_stopwatch};
use deskclock::model::interval::parse_minutes_seconds;
use deskclock::model::{Countdown, InputError, RunState, Stopwatch, TICK_INTERVAL, TickOutcome};
use std::time::Duration;

#[test]
fn test_stopwatch_counts_exact_ticks() {
    let mut sw = Stopwatch::new();
    sw.start();
    for n in 1..=1000u32 {
        assert_eq!(sw.tick(TICK_INTERVAL), TickOutcome::Advanced);
        assert_eq!(sw.elapsed(), TICK_INTERVAL * n);
    }
    assert_eq!(format_stopwatch(sw.elapsed()), "00:01:40.0");
}

#[test]
fn test_stopwatch_pause_resume_keeps_time() {
    let mut sw = Stopwatch::new();
    sw.start();
    for _ in 0..25 {
        sw.tick(TICK_INTERVAL);
    }
    sw.pause();
    assert_eq!(sw.state(), RunState::Stopped);
    for _ in 0..40 {
        assert_eq!(sw.tick(TICK_INTERVAL), TickOutcome::Idle);
    }
    sw.start();
    // Starting an already running stopwatch changes nothing.
    sw.start();
    for _ in 0..15 {
        sw.tick(TICK_INTERVAL);
    }
    assert_eq!(sw.elapsed(), Duration::from_secs(4));
    assert_eq!(format_stopwatch(sw.elapsed()), "00:00:04.0");
}

#[test]
fn test_stopwatch_reset_from_any_state() {
    let mut sw = Stopwatch::new();
    sw.start();
    sw.tick(Duration::from_millis(1500));
    sw.reset();
    assert_eq!(sw.elapsed(), Duration::ZERO);
    assert_eq!(sw.state(), RunState::Stopped);

    sw.start();
    sw.tick(TICK_INTERVAL);
    sw.pause();
    sw.reset();
    assert_eq!(sw.elapsed(), Duration::ZERO);
}

#[test]
fn test_timer_ten_seconds_completes_on_tick_100() {
    let mut cd = Countdown::new();
    cd.configure("0", "10").unwrap();
    cd.start().unwrap();

    for n in 1..100 {
        assert_eq!(cd.tick(TICK_INTERVAL), TickOutcome::Advanced, "tick {}", n);
        assert!(cd.is_running());
    }
    assert_eq!(cd.tick(TICK_INTERVAL), TickOutcome::Completed);
    assert_eq!(cd.remaining(), Duration::ZERO);
    assert_eq!(cd.state(), RunState::Stopped);

    // Nothing fires again afterwards.
    for _ in 0..50 {
        assert_eq!(cd.tick(TICK_INTERVAL), TickOutcome::Idle);
    }
    assert_eq!(format_countdown(cd.remaining()), "00:00:00");
}

#[test]
fn test_timer_never_goes_negative() {
    let mut cd = Countdown::new();
    cd.set(Duration::from_millis(250));
    cd.start().unwrap();
    assert_eq!(cd.tick(TICK_INTERVAL), TickOutcome::Advanced);
    assert_eq!(cd.tick(TICK_INTERVAL), TickOutcome::Advanced);
    // 50ms left, a full tick overshoots and is floored.
    assert_eq!(cd.tick(TICK_INTERVAL), TickOutcome::Completed);
    assert_eq!(cd.remaining(), Duration::ZERO);

    let mut completions = 0;
    let mut cd = Countdown::new();
    cd.set(Duration::from_secs(3));
    cd.start().unwrap();
    for _ in 0..10 {
        if cd.tick(Duration::from_millis(700)) == TickOutcome::Completed {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert_eq!(cd.remaining(), Duration::ZERO);
}

#[test]
fn test_timer_start_requires_time_left() {
    let mut cd = Countdown::new();
    assert_eq!(cd.start(), Err(InputError::ZeroDuration));
    assert_eq!(cd.state(), RunState::Stopped);

    cd.configure("", "").unwrap();
    assert_eq!(cd.start(), Err(InputError::ZeroDuration));
}

#[test]
fn test_timer_bad_input_leaves_state_alone() {
    let mut cd = Countdown::new();
    cd.configure("1", "0").unwrap();
    cd.start().unwrap();
    cd.tick(TICK_INTERVAL);

    let err = cd.configure("abc", "5").unwrap_err();
    assert!(matches!(err, InputError::NotANumber { field: "minutes", .. }));
    assert!(cd.is_running());
    assert_eq!(cd.remaining(), Duration::from_millis(59_900));
}

#[test]
fn test_timer_pause_and_reset() {
    let mut cd = Countdown::new();
    cd.configure("0", "5").unwrap();
    cd.start().unwrap();
    for _ in 0..10 {
        cd.tick(TICK_INTERVAL);
    }
    cd.pause();
    cd.tick(TICK_INTERVAL);
    assert_eq!(cd.remaining(), Duration::from_secs(4));

    cd.start().unwrap();
    cd.reset();
    assert_eq!(cd.remaining(), Duration::ZERO);
    assert_eq!(cd.state(), RunState::Stopped);
}

#[test]
fn test_reconfigure_stops_running_timer() {
    let mut cd = Countdown::new();
    cd.configure("2", "0").unwrap();
    cd.start().unwrap();
    let d = cd.configure("0", "45").unwrap();
    assert_eq!(d, Duration::from_secs(45));
    assert_eq!(cd.state(), RunState::Stopped);
    assert_eq!(cd.remaining(), Duration::from_secs(45));
}

#[test]
fn test_minutes_seconds_to_display() {
    let d = parse_minutes_seconds("5", "30").unwrap();
    assert_eq!(d, Duration::from_secs(330));
    assert_eq!(format_countdown(d), "00:05:30");

    let d = parse_minutes_seconds("90", "75").unwrap();
    assert_eq!(format_countdown(d), "01:31:15");
}
