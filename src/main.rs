use clap::Parser;
use prismmcp_lib::cli::{Cli, Commands};
use prismmcp_lib::{AppContext, AppError};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Default to errors only so log output never corrupts the TUI or the
    // shell-export output.
    let log_level = if cli.verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let ctx = AppContext::from_home()?;

    match cli.command {
        // Default to auto-detected interactive mode if no command is given.
        None => prismmcp_lib::run_auto(ctx),
        Some(Commands::Tui) => prismmcp_lib::tui::run(ctx),
        Some(Commands::Gui) => prismmcp_lib::gui::run(ctx),
        Some(Commands::Status { json }) => prismmcp_lib::cli::commands::status::execute(&ctx, json),
        Some(Commands::Env) => prismmcp_lib::cli::commands::env::execute(&ctx),
        Some(Commands::Sync) => prismmcp_lib::cli::commands::sync::execute(&ctx),
        Some(Commands::Completions { shell }) => {
            prismmcp_lib::cli::generate_completions(shell);
            Ok(())
        }
    }
}
