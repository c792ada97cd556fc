// File: ./src/model/display.rs
use chrono::{DateTime, Local};
use std::time::Duration;

fn split_hms(total_secs: u64) -> (u64, u64, u64) {
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    (hours, mins, secs)
}

/// `HH:MM:SS.d` with tenths truncated. Hours do not wrap.
pub fn format_stopwatch(elapsed: Duration) -> String {
    let tenths = elapsed.as_millis() / 100;
    let (h, m, s) = split_hms((tenths / 10) as u64);
    format!("{:02}:{:02}:{:02}.{}", h, m, s, tenths % 10)
}

/// `HH:MM:SS`, rounding a partial second up so the display only reads
/// `00:00:00` once the countdown has actually finished.
pub fn format_countdown(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }
    let (h, m, s) = split_hms(secs);
    format!("{:02}:{:02}:{:02}", h, m, s)
}

pub fn format_clock(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

pub fn format_date(now: &DateTime<Local>) -> String {
    now.format("%A, %d %B %Y").to_string()
}
