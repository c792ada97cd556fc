// File: ./src/model/interval.rs
//! Stopwatch and countdown timer state.
//!
//! Both trackers are advanced by an external periodic tick; they never read a
//! clock themselves. Durations are kept as `Duration` so that a long run of
//! fixed ticks sums exactly.
use crate::model::error::InputError;
use std::time::Duration;

/// Nominal period of the UI refresh tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tracker is stopped; nothing changed.
    Idle,
    Advanced,
    /// Countdown reached zero on this tick and stopped itself.
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    elapsed: Duration,
    state: RunState,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
    }

    pub fn pause(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        if self.state == RunState::Stopped {
            return TickOutcome::Idle;
        }
        self.elapsed += delta;
        TickOutcome::Advanced
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    remaining: Duration,
    state: RunState,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the remaining time from the minutes/seconds text fields and stops the timer.
    /// On error the timer is left untouched.
    pub fn configure(&mut self, minutes: &str, seconds: &str) -> Result<Duration, InputError> {
        let duration = parse_minutes_seconds(minutes, seconds)?;
        self.set(duration);
        Ok(duration)
    }

    pub fn set(&mut self, duration: Duration) {
        self.remaining = duration;
        self.state = RunState::Stopped;
    }

    pub fn start(&mut self) -> Result<(), InputError> {
        if self.remaining.is_zero() {
            return Err(InputError::ZeroDuration);
        }
        self.state = RunState::Running;
        Ok(())
    }

    pub fn pause(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        if self.state == RunState::Stopped {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() {
            self.state = RunState::Stopped;
            return TickOutcome::Completed;
        }
        TickOutcome::Advanced
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
}

/// Parses the timer's minutes and seconds fields.
///
/// Blank fields count as zero. Seconds past 59 are allowed and simply add up.
pub fn parse_minutes_seconds(minutes: &str, seconds: &str) -> Result<Duration, InputError> {
    fn field(name: &'static str, raw: &str) -> Result<u64, InputError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse::<u64>().map_err(|_| InputError::NotANumber {
            field: name,
            value: raw.to_string(),
        })
    }

    let mins = field("minutes", minutes)?;
    let secs = field("seconds", seconds)?;
    let total = mins.saturating_mul(60).saturating_add(secs);
    Ok(Duration::from_secs(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_zero() {
        assert_eq!(parse_minutes_seconds("", "  ").unwrap(), Duration::ZERO);
        assert_eq!(parse_minutes_seconds("2", "").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_minutes_seconds("", "90").unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        assert_eq!(
            parse_minutes_seconds("five", "0"),
            Err(InputError::NotANumber {
                field: "minutes",
                value: "five".to_string()
            })
        );
        assert!(parse_minutes_seconds("1", "-3").is_err());
        assert!(parse_minutes_seconds("1.5", "0").is_err());
    }

    #[test]
    fn stopped_trackers_ignore_ticks() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.tick(TICK_INTERVAL), TickOutcome::Idle);
        assert_eq!(sw.elapsed(), Duration::ZERO);

        let mut cd = Countdown::new();
        cd.set(Duration::from_secs(5));
        assert_eq!(cd.tick(TICK_INTERVAL), TickOutcome::Idle);
        assert_eq!(cd.remaining(), Duration::from_secs(5));
    }
}
