// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::config::Settings;
use crate::controller::ClockController;
use crate::model::AlarmTime;
use crate::tui::action::Tab;
use ratatui::widgets::ListState;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    AddingAlarm,
    EditingTimer,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TimerField {
    Minutes,
    Seconds,
}

pub struct AppState {
    pub controller: ClockController,

    // UI State
    pub tab: Tab,
    pub mode: InputMode,
    pub message: String,
    pub alarm_list_state: ListState,
    pub active_alarm: Option<AlarmTime>,
    pub config_path: String,

    // Input Buffers
    pub input_buffer: String,
    pub timer_minutes: String,
    pub timer_seconds: String,
    pub timer_field: TimerField,
}

impl AppState {
    pub fn new(controller: ClockController) -> Self {
        let mut alarm_list_state = ListState::default();
        if !controller.alarms().is_empty() {
            alarm_list_state.select(Some(0));
        }

        let config_path = Settings::get_path_string(controller.context())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            controller,
            tab: Tab::Clock,
            mode: InputMode::Normal,
            message: "Ready.".to_string(),
            alarm_list_state,
            active_alarm: None,
            config_path,
            input_buffer: String::new(),
            timer_minutes: String::new(),
            timer_seconds: String::new(),
            timer_field: TimerField::Minutes,
        }
    }

    pub fn selected_alarm(&self) -> Option<AlarmTime> {
        let idx = self.alarm_list_state.selected()?;
        self.controller.alarms().iter().nth(idx).copied()
    }

    pub fn next_alarm(&mut self) {
        let len = self.controller.alarms().len();
        if len == 0 {
            return;
        }
        let i = self.alarm_list_state.selected().map_or(0, |i| (i + 1) % len);
        self.alarm_list_state.select(Some(i));
    }

    pub fn previous_alarm(&mut self) {
        let len = self.controller.alarms().len();
        if len == 0 {
            return;
        }
        let i = self
            .alarm_list_state
            .selected()
            .map_or(0, |i| (i + len - 1) % len);
        self.alarm_list_state.select(Some(i));
    }

    /// Keeps the selection inside the list after it changed underneath us
    /// (user removal, or the scheduler consuming a fired alarm).
    pub fn clamp_alarm_selection(&mut self) {
        let len = self.controller.alarms().len();
        match self.alarm_list_state.selected() {
            _ if len == 0 => self.alarm_list_state.select(None),
            Some(i) if i >= len => self.alarm_list_state.select(Some(len - 1)),
            None => self.alarm_list_state.select(Some(0)),
            _ => {}
        }
    }
}
