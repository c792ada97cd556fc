// File: ./src/model/mod.rs
pub mod alarm;
pub mod display;
pub mod error;
pub mod interval;

pub use alarm::{AlarmSet, AlarmTime, poll};
pub use error::InputError;
pub use interval::{Countdown, RunState, Stopwatch, TICK_INTERVAL, TickOutcome};
