use anyhow::Result;
use deskclock::cli::{self, Command};
use deskclock::context::{SharedContext, StandardContext};
use std::env;
use std::sync::Arc;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = cli::parse_args(&args)?;
    let ctx: SharedContext = Arc::new(StandardContext::new(parsed.root.clone()));

    match &parsed.command {
        Command::Help => {
            cli::print_help("deskclock");
            Ok(())
        }
        Command::Tui => {
            cli::init_file_logging(ctx.as_ref(), parsed.log_level());
            deskclock::tui::run(ctx)
        }
        command => {
            cli::init_term_logging(parsed.log_level());
            cli::run_alarm_command(ctx.as_ref(), command)
        }
    }
}
