// File: src/tui/handlers.rs
// Handles keyboard input and scheduler events for the TUI.
use crate::controller::SaveOutcome;
use crate::model::display::format_countdown;
use crate::system::AlarmMessage;
use crate::tui::action::{Action, Tab};
use crate::tui::state::{AppState, InputMode, TimerField};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_alarm_message(state: &mut AppState, msg: AlarmMessage) {
    match msg {
        AlarmMessage::Fired(time) => {
            state.active_alarm = Some(time);
            state.message = format!("Alarm {} went off.", time);
            state.clamp_alarm_selection();
        }
    }
}

/// Saves on request and reports in the footer whether anything reached disk.
pub fn handle_save(state: &mut AppState) {
    state.message = match state.controller.save() {
        Ok(SaveOutcome::Saved) => "Settings saved.".to_string(),
        Ok(SaveOutcome::Skipped(reason)) => {
            format!("Not saved: settings file could not be loaded ({})", reason)
        }
        Err(e) => format!("Error: {}", e),
    };
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    // --- ALARM INTERCEPTION ---
    if state.active_alarm.take().is_some() {
        state.message = "Alarm dismissed.".to_string();
        return None;
    }

    match state.mode {
        InputMode::AddingAlarm => {
            handle_alarm_input(key, state);
            None
        }
        InputMode::EditingTimer => {
            handle_timer_input(key, state);
            None
        }
        InputMode::Normal => handle_normal(key, state),
    }
}

fn handle_normal(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('w') => return Some(Action::SaveSettings),
        KeyCode::Tab => state.tab = state.tab.next(),
        KeyCode::BackTab => state.tab = state.tab.previous(),
        KeyCode::Char(c) if Tab::from_digit(c).is_some() => {
            if let Some(tab) = Tab::from_digit(c) {
                state.tab = tab;
            }
        }
        _ => match state.tab {
            Tab::Clock => {}
            Tab::Alarms => handle_alarms_tab(key, state),
            Tab::Stopwatch => handle_stopwatch_tab(key, state),
            Tab::Timer => handle_timer_tab(key, state),
            Tab::Settings => handle_settings_tab(key, state),
        },
    }
    None
}

fn handle_alarms_tab(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('a') => {
            state.mode = InputMode::AddingAlarm;
            state.input_buffer.clear();
            state.message = "Type HH:MM and press Enter (Esc to cancel).".to_string();
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(time) = state.selected_alarm() {
                // The selection came from the set itself, so this cannot be malformed.
                if let Ok(true) = state.controller.remove_alarm(&time.to_string()) {
                    state.message = format!("Alarm {} removed.", time);
                }
                state.clamp_alarm_selection();
            }
        }
        KeyCode::Char('j') | KeyCode::Down => state.next_alarm(),
        KeyCode::Char('k') | KeyCode::Up => state.previous_alarm(),
        _ => {}
    }
}

fn handle_alarm_input(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.mode = InputMode::Normal;
            state.input_buffer.clear();
            state.message = "Cancelled.".to_string();
        }
        KeyCode::Backspace => {
            state.input_buffer.pop();
        }
        KeyCode::Enter => match state.controller.add_alarm(&state.input_buffer) {
            Ok(added) => {
                let time = state.input_buffer.trim().to_string();
                state.message = if added {
                    format!("Alarm {} added.", time)
                } else {
                    format!("Alarm {} is already set.", time)
                };
                state.input_buffer.clear();
                state.mode = InputMode::Normal;
                state.clamp_alarm_selection();
            }
            // Stay in input mode so the entry can be corrected.
            Err(e) => state.message = format!("Error: {}", e),
        },
        KeyCode::Char(c) if state.input_buffer.chars().count() < 5 => {
            state.input_buffer.push(c);
        }
        _ => {}
    }
}

fn handle_stopwatch_tab(key: KeyEvent, state: &mut AppState) {
    let sw = &mut state.controller.stopwatch;
    match key.code {
        KeyCode::Char('s') => sw.start(),
        KeyCode::Char('p') => sw.pause(),
        KeyCode::Char('r') => sw.reset(),
        _ => {}
    }
}

fn handle_timer_tab(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('s') => {
            if let Err(e) = state.controller.start_timer() {
                state.message = format!("Error: {}", e);
            }
        }
        KeyCode::Char('p') => state.controller.countdown.pause(),
        KeyCode::Char('r') => state.controller.countdown.reset(),
        KeyCode::Char('e') => {
            state.mode = InputMode::EditingTimer;
            state.timer_field = TimerField::Minutes;
            state.message =
                "Minutes, Tab, seconds, then Enter to set (Esc to cancel).".to_string();
        }
        _ => {}
    }
}

fn handle_timer_input(key: KeyEvent, state: &mut AppState) {
    let field = match state.timer_field {
        TimerField::Minutes => &mut state.timer_minutes,
        TimerField::Seconds => &mut state.timer_seconds,
    };

    match key.code {
        KeyCode::Esc => {
            state.mode = InputMode::Normal;
            state.message = "Cancelled.".to_string();
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.timer_field = match state.timer_field {
                TimerField::Minutes => TimerField::Seconds,
                TimerField::Seconds => TimerField::Minutes,
            };
        }
        KeyCode::Backspace => {
            field.pop();
        }
        KeyCode::Char(c) => field.push(c),
        KeyCode::Enter => {
            let (mins, secs) = (state.timer_minutes.clone(), state.timer_seconds.clone());
            match state.controller.configure_timer(&mins, &secs) {
                Ok(d) => {
                    state.mode = InputMode::Normal;
                    state.message =
                        format!("Timer set to {}. Press s to start.", format_countdown(d));
                }
                Err(e) => state.message = format!("Error: {}", e),
            }
        }
        _ => {}
    }
}

fn handle_settings_tab(key: KeyEvent, state: &mut AppState) {
    let ctl = &mut state.controller;
    match key.code {
        KeyCode::Char('t') => {
            let theme = ctl.toggle_theme();
            state.message = format!("Theme: {}", theme);
        }
        KeyCode::Char('o') => {
            let opacity = ctl.cycle_opacity();
            state.message = format!("Opacity: {:.0}%", opacity * 100.0);
        }
        KeyCode::Char('T') => {
            let on_top = ctl.toggle_always_on_top();
            state.message = format!("Always on top: {}", if on_top { "on" } else { "off" });
        }
        _ => {}
    }
}
