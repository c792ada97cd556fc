// File: src/controller.rs
//! Central logic controller for the clock.
//! Single owner of the settings, the armed alarms, both interval trackers and
//! the alarm scheduler. Front-ends (TUI, CLI) delegate every user intent here.
use crate::config::{LoadOutcome, OPACITY_PRESETS, Settings, Theme, clamp_opacity};
use crate::context::AppContext;
use crate::model::{AlarmSet, AlarmTime, Countdown, InputError, Stopwatch, TickOutcome};
use crate::system::{
    AlarmMessage, AlarmScheduler, AlarmWatcher, AlertKind, AlertSink, LocalClock, SharedAlarms,
    TimeSource, lock_alarms,
};
use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// What `save` actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Nothing was written because the settings file failed to load at startup.
    Skipped(String),
}

pub struct ClockController {
    ctx: Arc<dyn AppContext>,
    settings: Settings,
    load_outcome: LoadOutcome,
    alarms: SharedAlarms,
    sink: Arc<dyn AlertSink>,
    scheduler: AlarmScheduler,
    pub stopwatch: Stopwatch,
    pub countdown: Countdown,
}

impl ClockController {
    /// Loads settings through `ctx` and wires a scheduler against the local clock.
    pub fn new(
        ctx: Arc<dyn AppContext>,
        sink: Arc<dyn AlertSink>,
        events: Option<mpsc::Sender<AlarmMessage>>,
    ) -> Self {
        let (settings, outcome) = Settings::load_or_default(ctx.as_ref());
        Self::with_settings(ctx, settings, outcome, sink, Arc::new(LocalClock), events)
    }

    pub fn with_settings(
        ctx: Arc<dyn AppContext>,
        mut settings: Settings,
        load_outcome: LoadOutcome,
        sink: Arc<dyn AlertSink>,
        clock: Arc<dyn TimeSource>,
        events: Option<mpsc::Sender<AlarmMessage>>,
    ) -> Self {
        // The shared set is authoritative from here on; settings get a copy back on save.
        let alarms: SharedAlarms = Arc::new(Mutex::new(std::mem::take(&mut settings.alarms)));
        let watcher = AlarmWatcher::new(alarms.clone(), clock, sink.clone(), events);

        Self {
            ctx,
            settings,
            load_outcome,
            alarms,
            sink,
            scheduler: AlarmScheduler::new(watcher),
            stopwatch: Stopwatch::new(),
            countdown: Countdown::new(),
        }
    }

    /// Takes effect on the next `start_scheduler`.
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.scheduler.set_poll_interval(interval);
    }

    pub fn context(&self) -> &dyn AppContext {
        self.ctx.as_ref()
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    // --- Alarms ---

    /// Arms an alarm from user text. Returns `false` if it was already armed.
    pub fn add_alarm(&self, input: &str) -> Result<bool, InputError> {
        let time: AlarmTime = input.parse()?;
        let added = lock_alarms(&self.alarms).add(time);
        if added {
            log::info!("Alarm armed: {}", time);
        }
        Ok(added)
    }

    /// Disarms an alarm. Returns `false` if it was not armed.
    pub fn remove_alarm(&self, input: &str) -> Result<bool, InputError> {
        let time: AlarmTime = input.parse()?;
        let removed = lock_alarms(&self.alarms).remove(&time);
        if removed {
            log::info!("Alarm removed: {}", time);
        }
        Ok(removed)
    }

    /// Snapshot of the armed alarms.
    pub fn alarms(&self) -> AlarmSet {
        lock_alarms(&self.alarms).clone()
    }

    pub fn start_scheduler(&mut self) -> Result<()> {
        self.scheduler.start()
    }

    pub fn stop_scheduler(&mut self) {
        self.scheduler.stop();
    }

    pub fn scheduler(&self) -> &AlarmScheduler {
        &self.scheduler
    }

    // --- Stopwatch / Timer ---

    pub fn configure_timer(
        &mut self,
        minutes: &str,
        seconds: &str,
    ) -> Result<Duration, InputError> {
        self.countdown.configure(minutes, seconds)
    }

    pub fn start_timer(&mut self) -> Result<(), InputError> {
        self.countdown.start()
    }

    /// Advances both trackers by `delta`. Returns `true` when the countdown
    /// finished on this tick; the alert has already been raised by then.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.stopwatch.tick(delta);
        if self.countdown.tick(delta) != TickOutcome::Completed {
            return false;
        }
        log::info!("Timer finished");
        if let Err(e) = self.sink.alert(AlertKind::TimerFinished) {
            log::warn!("Failed to play timer alert: {}", e);
        }
        true
    }

    // --- Settings ---

    /// Current settings. `alarms` in here is only refreshed by `save`; use
    /// `alarms()` for the live set.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.theme
    }

    pub fn set_opacity(&mut self, value: f64) -> f64 {
        self.settings.opacity = clamp_opacity(value);
        self.settings.opacity
    }

    /// Steps to the next lower preset, wrapping back to fully opaque.
    pub fn cycle_opacity(&mut self) -> f64 {
        let current = self.settings.opacity;
        let next = OPACITY_PRESETS
            .iter()
            .copied()
            .find(|p| *p < current - f64::EPSILON)
            .unwrap_or(OPACITY_PRESETS[0]);
        self.set_opacity(next)
    }

    pub fn toggle_always_on_top(&mut self) -> bool {
        self.settings.always_on_top = !self.settings.always_on_top;
        self.settings.always_on_top
    }

    pub fn set_geometry(&mut self, geometry: String) {
        self.settings.geometry = geometry;
    }

    /// Copies the live alarm set into the settings and writes them out, unless
    /// the settings file could not be parsed at startup.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        self.settings.alarms = self.alarms();
        if let LoadOutcome::Fallback(reason) = &self.load_outcome {
            return Ok(SaveOutcome::Skipped(reason.clone()));
        }
        self.settings.save(self.ctx.as_ref())?;
        Ok(SaveOutcome::Saved)
    }

    /// Stops the scheduler, then saves.
    pub fn shutdown(&mut self) -> Result<SaveOutcome> {
        self.stop_scheduler();
        let outcome = self.save()?;
        if let SaveOutcome::Skipped(reason) = &outcome {
            log::warn!(
                "Not saving settings: the existing file could not be loaded ({})",
                reason
            );
        }
        Ok(outcome)
    }
}
