use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Installer for cjk-token-reducer and its Claude Code hook.
#[derive(Debug, Parser)]
#[command(name = "cjk-setup", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Install the binary and register the UserPromptSubmit hook
    Install,
    /// Deregister the hook and remove the installed binary
    Uninstall,
    /// Report install and hook state without changing anything
    Status,
}

fn main() -> ExitCode {
    // Diagnostics on stderr, silent unless RUST_LOG is set. User-facing
    // output goes through the console layer, not tracing.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap exits 2 on bad input by default; the contract here is
            // 0 (help/version) or 1 (anything else).
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match cli.command {
        Some(Commands::Install) => cjk_setup::run_install(),
        Some(Commands::Uninstall) => cjk_setup::run_uninstall(),
        Some(Commands::Status) => cjk_setup::run_status(),
        None => {
            let _ = Cli::command().print_long_help();
            ExitCode::SUCCESS
        }
    }
}
