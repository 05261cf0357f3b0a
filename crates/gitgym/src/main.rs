//! gitgym CLI - Learn git through interactive exercises

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use gitgym_core::Config;

use cli::Commands;

fn main() -> ExitCode {
    let cli = cli::parse();

    if !git_available() {
        output::print_error("Error: git is not installed or not found in PATH.");
        eprintln!(
            "Please install git before using gitgym:\n\
             \x20 macOS:  brew install git\n\
             \x20 Ubuntu: sudo apt install git\n\
             \x20 Windows: https://git-scm.com/download/win"
        );
        return ExitCode::from(1);
    }

    let config = match Config::resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let result = match cli.command {
        Some(Commands::List) => commands::run_list(&config),
        Some(Commands::Start { exercise }) => commands::run_start(&config, exercise),
        Some(Commands::Next) => commands::run_start(&config, None),
        Some(Commands::Describe) => commands::run_describe(&config),
        Some(Commands::Verify) => commands::run_verify(&config),
        Some(Commands::Hint) => commands::run_hint(&config),
        Some(Commands::Reset { exercise, all }) => commands::run_reset(&config, exercise, all),
        Some(Commands::Watch) => commands::run_watch(&config),
        Some(Commands::Progress) => commands::run_progress(&config),
        None => {
            // No subcommand - print version info
            println!("gitgym v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            Ok(0)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code().clamp(1, 255) as u8)
        }
    }
}

/// True if git is on PATH and responds to --version
fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
