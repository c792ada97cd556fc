// File: ./src/system.rs
// Background alarm scheduler and the notification sink it fires into.
use crate::model::{AlarmSet, AlarmTime, poll};
use anyhow::Result;
use chrono::Local;
use notify_rust::Notification;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;

/// How often the scheduler looks at the wall clock.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// The armed alarms, shared between the UI and the scheduler thread.
pub type SharedAlarms = Arc<Mutex<AlarmSet>>;

pub fn lock_alarms(alarms: &SharedAlarms) -> std::sync::MutexGuard<'_, AlarmSet> {
    alarms.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmMessage {
    Fired(AlarmTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Alarm(AlarmTime),
    TimerFinished,
}

/// Something that can get the user's attention.
pub trait AlertSink: Send + Sync {
    fn alert(&self, kind: AlertKind) -> Result<()>;
}

/// Rings the terminal bell and posts a desktop notification.
#[derive(Debug, Default)]
pub struct DesktopAlert;

impl AlertSink for DesktopAlert {
    fn alert(&self, kind: AlertKind) -> Result<()> {
        let body = match kind {
            AlertKind::Alarm(t) => format!("Alarm: {}", t),
            AlertKind::TimerFinished => "Timer finished".to_string(),
        };

        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;

        Notification::new()
            .summary("Deskclock")
            .body(&body)
            .appname("Deskclock")
            .show()?;
        Ok(())
    }
}

/// Source of the current wall-clock minute.
pub trait TimeSource: Send + Sync {
    fn current_minute(&self) -> AlarmTime;
}

#[derive(Debug, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn current_minute(&self) -> AlarmTime {
        AlarmTime::from_time(Local::now().time())
    }
}

/// One polling step of the scheduler, kept separate from the thread so it can
/// be driven directly.
pub struct AlarmWatcher {
    alarms: SharedAlarms,
    clock: Arc<dyn TimeSource>,
    sink: Arc<dyn AlertSink>,
    events: Option<mpsc::Sender<AlarmMessage>>,
    last_triggered: Option<AlarmTime>,
}

impl AlarmWatcher {
    pub fn new(
        alarms: SharedAlarms,
        clock: Arc<dyn TimeSource>,
        sink: Arc<dyn AlertSink>,
        events: Option<mpsc::Sender<AlarmMessage>>,
    ) -> Self {
        Self {
            alarms,
            clock,
            sink,
            events,
            last_triggered: None,
        }
    }

    /// Checks the current minute against the armed alarms and fires at most
    /// once per minute. Returns the alarm that fired.
    pub fn check(&mut self) -> Option<AlarmTime> {
        let now = self.clock.current_minute();

        match self.last_triggered {
            Some(last) if last == now => return None,
            Some(_) => self.last_triggered = None,
            None => {}
        }

        // Copy on read: never hold the lock while comparing or alerting.
        let snapshot = lock_alarms(&self.alarms).clone();
        let fired = poll(now, &snapshot)?;
        self.last_triggered = Some(fired);
        log::info!("Alarm fired: {}", fired);

        if let Err(e) = self.sink.alert(AlertKind::Alarm(fired)) {
            log::warn!("Failed to play alarm {}: {}", fired, e);
        }

        lock_alarms(&self.alarms).remove(&fired);

        if let Some(tx) = &self.events
            && let Err(e) = tx.try_send(AlarmMessage::Fired(fired))
        {
            log::warn!("Could not deliver alarm {} to UI: {}", fired, e);
        }

        Some(fired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Owns the background thread that runs an `AlarmWatcher` every poll interval.
pub struct AlarmScheduler {
    watcher: Option<AlarmWatcher>,
    poll_interval: Duration,
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<AlarmWatcher>>,
}

impl AlarmScheduler {
    pub fn new(watcher: AlarmWatcher) -> Self {
        Self {
            watcher: Some(watcher),
            poll_interval: DEFAULT_POLL_INTERVAL,
            stop_flag: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Intervals above one second are capped. Takes effect on the next `start`.
    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval.min(DEFAULT_POLL_INTERVAL);
    }

    pub fn state(&self) -> SchedulerState {
        if self.handle.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    /// Spawns the polling thread. A no-op while already running.
    pub fn start(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }
        let Some(mut watcher) = self.watcher.take() else {
            anyhow::bail!("Alarm scheduler cannot restart: its previous thread panicked");
        };

        self.stop_flag.store(false, Ordering::SeqCst);
        let stop = self.stop_flag.clone();
        let interval = self.poll_interval;

        let spawned = std::thread::Builder::new()
            .name("alarm-scheduler".to_string())
            .spawn(move || {
                log::debug!("Alarm scheduler started");
                while !stop.load(Ordering::SeqCst) {
                    watcher.check();
                    std::thread::sleep(interval);
                }
                log::debug!("Alarm scheduler stopped");
                watcher
            });

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => Err(anyhow::anyhow!("Failed to spawn alarm scheduler: {}", e)),
        }
    }

    /// Signals the thread and waits for it; it exits within one poll interval.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.stop_flag.store(true, Ordering::SeqCst);
        match handle.join() {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(_) => log::error!("Alarm scheduler thread panicked"),
        }
    }
}

impl Drop for AlarmScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
