// Errors raised at the input boundary. None of them change state.
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Alarm text that is not a valid `HH:MM` time.
    AlarmFormat(String),
    /// A timer field that is not a non-negative whole number.
    NotANumber { field: &'static str, value: String },
    /// The countdown was started with nothing left to count.
    ZeroDuration,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::AlarmFormat(s) => {
                write!(f, "Invalid alarm time '{}'. Use HH:MM (00:00 to 23:59)", s)
            }
            InputError::NotANumber { field, value } => {
                write!(f, "Invalid {} '{}'. Enter a whole number", field, value)
            }
            InputError::ZeroDuration => write!(f, "Timer is at 00:00:00. Set a duration first"),
        }
    }
}

impl std::error::Error for InputError {}
