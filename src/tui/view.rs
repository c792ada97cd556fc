// File: src/tui/view.rs
use crate::config::{Settings, Theme};
use crate::model::display::{format_clock, format_countdown, format_date, format_stopwatch};
use crate::model::RunState;
use crate::tui::action::Tab;
use crate::tui::state::{AppState, InputMode, TimerField};

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};

struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    dim: Color,
}

fn palette(settings: &Settings) -> Palette {
    let accent = match settings.color_theme.as_str() {
        "green" => Color::Green,
        "dark-blue" => Color::Blue,
        "blue" => Color::LightBlue,
        _ => Color::Cyan,
    };
    match settings.theme {
        Theme::Dark => Palette {
            fg: Color::White,
            bg: Color::Black,
            accent,
            dim: Color::DarkGray,
        },
        Theme::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            accent,
            dim: Color::Gray,
        },
    }
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let pal = palette(state.controller.settings());
    let base = Style::default().fg(pal.fg).bg(pal.bg);

    f.render_widget(Block::default().style(base), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{}:{}", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(" Deskclock "))
        .style(base)
        .highlight_style(
            Style::default()
                .fg(pal.accent)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.tab.index());
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        Tab::Clock => draw_clock(f, chunks[1], &pal),
        Tab::Alarms => draw_alarms(f, chunks[1], state, &pal),
        Tab::Stopwatch => draw_stopwatch(f, chunks[1], state, &pal),
        Tab::Timer => draw_timer(f, chunks[1], state, &pal),
        Tab::Settings => draw_settings(f, chunks[1], state, &pal),
    }

    let hint = match (state.mode, state.tab) {
        (InputMode::AddingAlarm, _) => "Enter:Add  Esc:Cancel",
        (InputMode::EditingTimer, _) => "Tab:Switch field  Enter:Set  Esc:Cancel",
        (_, Tab::Alarms) => "a:Add  d:Delete  j/k:Move  w:Save  q:Quit",
        (_, Tab::Stopwatch) => "s:Start  p:Pause  r:Reset  q:Quit",
        (_, Tab::Timer) => "e:Edit  s:Start  p:Pause  r:Reset  q:Quit",
        (_, Tab::Settings) => "t:Theme  o:Opacity  T:On top  w:Save  q:Quit",
        _ => "Tab/1-5:Switch tab  q:Quit",
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", state.message),
            Style::default().fg(pal.accent),
        ),
        Span::styled(format!(" {}", hint), Style::default().fg(pal.dim)),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .style(base);
    f.render_widget(footer, chunks[2]);

    if let Some(time) = state.active_alarm {
        let area = centered_rect(40, 30, f.area());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" ALARM ")
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(pal.bg)
                    .add_modifier(Modifier::BOLD),
            );
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(time.to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to dismiss",
                Style::default().fg(pal.fg),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        f.render_widget(Clear, area);
        f.render_widget(p, area);
    }
}

fn big_text<'a>(lines: Vec<Line<'a>>, area: Rect) -> (Paragraph<'a>, Rect) {
    let height = lines.len() as u16;
    let top = area.height.saturating_sub(height) / 2;
    let inner = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: height.min(area.height),
    };
    (Paragraph::new(lines).alignment(Alignment::Center), inner)
}

fn draw_clock(f: &mut Frame, area: Rect, pal: &Palette) {
    let now = Local::now();
    let (p, rect) = big_text(
        vec![
            Line::from(Span::styled(
                format_clock(&now),
                Style::default()
                    .fg(pal.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format_date(&now)),
        ],
        area,
    );
    f.render_widget(p, rect);
}

fn run_label(state: RunState) -> &'static str {
    match state {
        RunState::Running => "running",
        RunState::Stopped => "stopped",
    }
}

fn draw_stopwatch(f: &mut Frame, area: Rect, state: &AppState, pal: &Palette) {
    let sw = &state.controller.stopwatch;
    let (p, rect) = big_text(
        vec![
            Line::from(Span::styled(
                format_stopwatch(sw.elapsed()),
                Style::default()
                    .fg(pal.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(run_label(sw.state()), Style::default().fg(pal.dim))),
        ],
        area,
    );
    f.render_widget(p, rect);
}

fn draw_timer(f: &mut Frame, area: Rect, state: &AppState, pal: &Palette) {
    let cd = &state.controller.countdown;
    let editing = state.mode == InputMode::EditingTimer;

    let field = |label: &str, value: &str, active: bool| {
        let style = if editing && active {
            Style::default()
                .fg(pal.accent)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(pal.dim)
        };
        Span::styled(format!(" {}: {:>4} ", label, value), style)
    };

    let (p, rect) = big_text(
        vec![
            Line::from(Span::styled(
                format_countdown(cd.remaining()),
                Style::default()
                    .fg(pal.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(run_label(cd.state()), Style::default().fg(pal.dim))),
            Line::from(""),
            Line::from(vec![
                field(
                    "Min",
                    &state.timer_minutes,
                    state.timer_field == TimerField::Minutes,
                ),
                Span::raw("  "),
                field(
                    "Sec",
                    &state.timer_seconds,
                    state.timer_field == TimerField::Seconds,
                ),
            ]),
        ],
        area,
    );
    f.render_widget(p, rect);
}

fn draw_alarms(f: &mut Frame, area: Rect, state: &mut AppState, pal: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let input_style = if state.mode == InputMode::AddingAlarm {
        Style::default().fg(pal.accent)
    } else {
        Style::default().fg(pal.dim)
    };
    let input_text = if state.mode == InputMode::AddingAlarm {
        state.input_buffer.clone()
    } else {
        "HH:MM".to_string()
    };
    let input = Paragraph::new(input_text)
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(" New alarm "));
    f.render_widget(input, chunks[0]);

    let alarms = state.controller.alarms();
    let items: Vec<ListItem> = alarms
        .iter()
        .map(|t| ListItem::new(Line::from(format!("  {}", t))))
        .collect();
    let title = format!(" Active alarms ({}) ", alarms.len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(pal.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], &mut state.alarm_list_state);
}

fn draw_settings(f: &mut Frame, area: Rect, state: &AppState, pal: &Palette) {
    let s = state.controller.settings();
    let row = |key: &str, label: &str, value: String| {
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", key),
                Style::default()
                    .fg(pal.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{:<16}", label)),
            Span::raw(value),
        ])
    };

    let lines = vec![
        row("t", "Theme", s.theme.to_string()),
        row("o", "Opacity", format!("{:.0}%", s.opacity * 100.0)),
        row(
            "T",
            "Always on top",
            if s.always_on_top { "on" } else { "off" }.to_string(),
        ),
        row(" ", "Color theme", s.color_theme.clone()),
        row(" ", "Geometry", s.geometry.clone()),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Config: {}", state.config_path),
            Style::default().fg(pal.dim),
        )),
    ];

    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Settings "))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
