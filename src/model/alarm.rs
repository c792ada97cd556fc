// File: ./src/model/alarm.rs
// Alarm times and the ordered set of armed alarms.
use crate::model::error::InputError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A wall-clock minute, rendered as `HH:MM`.
///
/// Field order matters: the derived `Ord` compares hour first, so sorting
/// `AlarmTime`s is chronological and matches sorting their `HH:MM` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

impl AlarmTime {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Truncates a time of day to its minute.
    pub fn from_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for AlarmTime {
    type Err = InputError;

    /// Strict `HH:MM`: exactly five characters, two-digit fields, `:` separator.
    /// Surrounding whitespace is tolerated since it usually comes from a text field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || InputError::AlarmFormat(s.to_string());

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(bad());
        }
        let (h, m) = (&s[..2], &s[3..]);
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }

        let hour: u8 = h.parse().map_err(|_| bad())?;
        let minute: u8 = m.parse().map_err(|_| bad())?;
        Self::new(hour, minute).ok_or_else(bad)
    }
}

/// Armed alarms, always sorted and free of duplicates.
///
/// Persisted as a plain JSON list of `"HH:MM"` strings. Entries that fail to
/// parse while loading are dropped with a warning instead of failing the
/// whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AlarmSet {
    times: BTreeSet<AlarmTime>,
}

impl AlarmSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the alarm was already armed.
    pub fn add(&mut self, time: AlarmTime) -> bool {
        self.times.insert(time)
    }

    /// Returns `false` if the alarm was not armed.
    pub fn remove(&mut self, time: &AlarmTime) -> bool {
        self.times.remove(time)
    }

    pub fn contains(&self, time: &AlarmTime) -> bool {
        self.times.contains(time)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlarmTime> {
        self.times.iter()
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.times.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<AlarmTime> for AlarmSet {
    fn from_iter<I: IntoIterator<Item = AlarmTime>>(iter: I) -> Self {
        Self {
            times: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<String>> for AlarmSet {
    fn from(raw: Vec<String>) -> Self {
        raw.into_iter()
            .filter_map(|s| match s.parse::<AlarmTime>() {
                Ok(t) => Some(t),
                Err(e) => {
                    log::warn!("Ignoring stored alarm: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl From<AlarmSet> for Vec<String> {
    fn from(set: AlarmSet) -> Self {
        set.to_strings()
    }
}

/// Returns the armed alarm matching `now`, if any.
pub fn poll(now: AlarmTime, armed: &AlarmSet) -> Option<AlarmTime> {
    armed.contains(&now).then_some(now)
}
