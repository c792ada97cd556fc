// File: ./src/cli.rs
//! Shared command-line interface logic: argument parsing, help, logging setup
//! and the non-interactive alarm commands.
use crate::config::{LoadOutcome, Settings};
use crate::context::AppContext;
use crate::model::AlarmTime;
use anyhow::{Result, bail};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode, WriteLogger};
use std::fs::OpenOptions;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tui,
    Help,
    ListAlarms,
    AddAlarm(String),
    RemoveAlarm(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub verbose: bool,
    pub command: Command,
}

impl CliArgs {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Parses arguments, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut root = None;
    let mut verbose = false;
    let mut command = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => command = Some(Command::Help),
            "--verbose" | "-v" => verbose = true,
            "--root" | "-r" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--root needs a path");
                };
                root = Some(PathBuf::from(path));
                i += 1;
            }
            "alarms" => command = Some(Command::ListAlarms),
            "add" | "remove" => {
                let Some(time) = args.get(i + 1) else {
                    bail!("'{}' needs a time in HH:MM form", args[i]);
                };
                command = Some(if args[i] == "add" {
                    Command::AddAlarm(time.clone())
                } else {
                    Command::RemoveAlarm(time.clone())
                });
                i += 1;
            }
            other => bail!("Unknown argument '{}'. Try --help", other),
        }
        // Help wins over everything else on the line.
        if command == Some(Command::Help) {
            break;
        }
        i += 1;
    }

    Ok(CliArgs {
        root,
        verbose,
        command: command.unwrap_or(Command::Tui),
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Deskclock v{} - Clock, alarms, stopwatch and timer (TUI)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [-v]", binary_name);
    println!("    {} alarms", binary_name);
    println!("    {} add <HH:MM>", binary_name);
    println!("    {} remove <HH:MM>", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Log debug output.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("ALARM COMMANDS:");
    println!("    {} alarms             List armed alarms", binary_name);
    println!("    {} add 07:30          Arm an alarm for 07:30", binary_name);
    println!("    {} remove 07:30       Disarm the 07:30 alarm", binary_name);
    println!();
    println!("KEYBINDINGS:");
    println!("    Tab / 1-5     Switch tab          q     Quit");
    println!("    w             Save settings now");
    println!("    s / p / r     Start, pause, reset the stopwatch or timer");
    println!("    a / d         Add or delete an alarm (Alarms tab)");
    println!("    e             Edit the timer duration (Timer tab)");
    println!("    t / o / T     Theme, opacity, always-on-top (Settings tab)");
}

fn log_config() -> simplelog::Config {
    ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build()
}

/// Logs to `deskclock.log` in the data dir; the terminal belongs to the UI.
pub fn init_file_logging(ctx: &dyn AppContext, level: LevelFilter) {
    let Some(path) = ctx.get_log_path() else {
        return;
    };
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, log_config(), file);
        }
        Err(e) => eprintln!("Warning: could not open log file {:?}: {}", path, e),
    }
}

pub fn init_term_logging(level: LevelFilter) {
    let _ = TermLogger::init(
        level,
        log_config(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Runs one of the non-interactive alarm commands against the settings file.
pub fn run_alarm_command(ctx: &dyn AppContext, command: &Command) -> Result<()> {
    let (mut settings, outcome) = Settings::load_or_default(ctx);
    if let LoadOutcome::Fallback(reason) = &outcome
        && !matches!(command, Command::ListAlarms)
    {
        bail!("Refusing to modify settings: {}", reason);
    }

    match command {
        Command::ListAlarms => {
            if settings.alarms.is_empty() {
                println!("No alarms armed.");
            }
            for t in settings.alarms.iter() {
                println!("{}", t);
            }
            return Ok(());
        }
        Command::AddAlarm(raw) => {
            let time: AlarmTime = raw.parse()?;
            if settings.alarms.add(time) {
                println!("Armed {}", time);
            } else {
                println!("{} is already armed", time);
            }
        }
        Command::RemoveAlarm(raw) => {
            let time: AlarmTime = raw.parse()?;
            if settings.alarms.remove(&time) {
                println!("Removed {}", time);
            } else {
                println!("{} was not armed", time);
            }
        }
        Command::Tui | Command::Help => return Ok(()),
    }

    settings.save(ctx)
}
