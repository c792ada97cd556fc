// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod state;
pub mod view;

use crate::context::SharedContext;
use crate::controller::{ClockController, SaveOutcome};
use crate::model::TICK_INTERVAL;
use crate::system::{AlarmMessage, DesktopAlert};
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub fn run(ctx: SharedContext) -> Result<()> {
    // Panic Hook
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        log::error!("PANIC: {:?}", info);
        default_hook(info);
    }));

    // --- 1. CORE ---
    let (alarm_tx, mut alarm_rx) = mpsc::channel(10);
    let mut controller = ClockController::new(ctx, Arc::new(DesktopAlert), Some(alarm_tx));
    controller.start_scheduler()?;

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(controller);
    let loop_result = ui_loop(&mut terminal, &mut app_state, &mut alarm_rx);

    // --- 3. CLEANUP ---
    if let Ok(size) = terminal.size() {
        app_state
            .controller
            .set_geometry(format!("{}x{}", size.width, size.height));
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match app_state.controller.shutdown() {
        Ok(SaveOutcome::Saved) => {}
        Ok(SaveOutcome::Skipped(reason)) => {
            eprintln!("Warning: settings were not saved: {}", reason);
        }
        Err(e) => eprintln!("Warning: could not save settings: {}", e),
    }
    loop_result
}

fn ui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_state: &mut AppState,
    alarm_rx: &mut mpsc::Receiver<AlarmMessage>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw(f, app_state))?;

        // A. Scheduler Signals
        while let Ok(msg) = alarm_rx.try_recv() {
            handlers::handle_alarm_message(app_state, msg);
        }

        // B. Ticks: apply every whole interval that has passed since the last one.
        while last_tick.elapsed() >= TICK_INTERVAL {
            last_tick += TICK_INTERVAL;
            if app_state.controller.tick(TICK_INTERVAL) {
                app_state.message = "Timer finished!".to_string();
            }
        }

        // C. Input Events
        let timeout = TICK_INTERVAL
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            // Filter out KeyRelease events to prevent double input on Windows
            if key.kind == event::KeyEventKind::Release {
                continue;
            }

            match handlers::handle_key_event(key, app_state) {
                Some(Action::Quit) => break,
                Some(Action::SaveSettings) => handlers::handle_save(app_state),
                None => {}
            }
        }
    }
    Ok(())
}
