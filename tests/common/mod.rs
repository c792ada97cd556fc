// Test doubles shared by the integration tests.
#![allow(dead_code)]
use deskclock::model::AlarmTime;
use deskclock::system::{AlertKind, AlertSink, TimeSource};
use std::sync::Mutex;

/// Clock that reads whatever minute the test last set.
pub struct FakeClock {
    now: Mutex<AlarmTime>,
}

impl FakeClock {
    pub fn at(hhmm: &str) -> Self {
        Self {
            now: Mutex::new(hhmm.parse().unwrap()),
        }
    }

    pub fn set(&self, hhmm: &str) {
        *self.now.lock().unwrap() = hhmm.parse().unwrap();
    }
}

impl TimeSource for FakeClock {
    fn current_minute(&self) -> AlarmTime {
        *self.now.lock().unwrap()
    }
}

/// Records every alert; optionally fails each one after recording it.
#[derive(Default)]
pub struct RecordingSink {
    pub alerts: Mutex<Vec<AlertKind>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.alerts.lock().unwrap().len()
    }

    pub fn kinds(&self) -> Vec<AlertKind> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingSink {
    fn alert(&self, kind: AlertKind) -> anyhow::Result<()> {
        self.alerts.lock().unwrap().push(kind);
        if self.fail {
            anyhow::bail!("audio device unavailable");
        }
        Ok(())
    }
}

pub fn t(hhmm: &str) -> AlarmTime {
    hhmm.parse().unwrap()
}
