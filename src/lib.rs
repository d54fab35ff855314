pub mod domain;
pub mod hooks;
pub mod path;

pub(crate) mod cli;
pub(crate) mod console;
pub(crate) mod host;

use std::process::ExitCode;

use crate::domain::EnvSnapshot;

/// Run the install pipeline: verify the host CLI, copy the built binary
/// into place, and register the `UserPromptSubmit` hook.
///
/// This is a binary entry point bridging `main.rs` to the library without
/// exposing `cli` internals. Not a stable integration API — callers wanting
/// the hook operations should use [`hooks::register`] directly.
pub fn run_install() -> ExitCode {
    let env = EnvSnapshot::capture();
    match cli::install::run(&env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cli::report_fatal(&err);
            ExitCode::FAILURE
        }
    }
}

/// Run the uninstall pipeline. A declined confirmation exits 0 with no
/// changes made.
pub fn run_uninstall() -> ExitCode {
    let env = EnvSnapshot::capture();
    match cli::uninstall::run(&env) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            cli::report_fatal(&err);
            ExitCode::FAILURE
        }
    }
}

/// Run the read-only status report.
pub fn run_status() -> ExitCode {
    let env = EnvSnapshot::capture();
    match cli::status::run(&env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cli::report_fatal(&err);
            ExitCode::FAILURE
        }
    }
}
