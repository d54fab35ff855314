//! The `status` report: every check the other pipelines perform, read-only.

use crate::cli::FatalError;
use crate::console;
use crate::domain::identity::BINARY_NAME;
use crate::domain::{BinaryIdentity, EnvSnapshot, Platform};
use crate::hooks::{self, RegistrationState};
use crate::host;
use crate::path;

/// Prints the install and registration state without writing anywhere.
/// Incomplete state is reported, not treated as a failure; only resolver
/// errors (no home directory, unsupported platform) are fatal.
pub fn run(env: &EnvSnapshot) -> Result<(), FatalError> {
    let platform = Platform::current().map_err(path::PathError::from)?;
    let dir = path::install_dir(env, platform)?;
    let binary = path::binary_path(&dir, platform);
    let settings = host::settings_path(env)?;

    console::heading(&format!("{BINARY_NAME} status"));

    let mut complete = true;

    if path::is_executable(&binary) {
        console::success(&format!("binary installed: {}", binary.display()));
    } else if binary.exists() {
        console::missing(&format!(
            "binary present but not executable: {}",
            binary.display()
        ));
        complete = false;
    } else {
        console::missing(&format!(
            "binary not installed (expected at {})",
            binary.display()
        ));
        complete = false;
    }

    match host::find_claude_cli() {
        Some(claude) => console::success(&format!("claude CLI: {}", claude.display())),
        None => {
            console::missing("claude CLI not found on PATH");
            complete = false;
        }
    }

    if path::is_on_search_path(&dir, env) {
        console::success(&format!("{} is on PATH", dir.display()));
    } else {
        console::missing(&format!("{} is not on PATH", dir.display()));
        complete = false;
    }

    let identity = BinaryIdentity::managed(&binary);
    match hooks::registration_state(&settings, &identity) {
        RegistrationState::Registered => console::success(&format!(
            "{} hook registered in {}",
            hooks::HOOK_EVENT,
            settings.display()
        )),
        RegistrationState::NotRegistered => {
            console::missing(&format!(
                "{} hook not registered in {}",
                hooks::HOOK_EVENT,
                settings.display()
            ));
            complete = false;
        }
        RegistrationState::Unreadable => {
            console::missing(&format!(
                "{} exists but is not valid JSON; hook state unknown",
                settings.display()
            ));
            complete = false;
        }
    }

    if !complete {
        println!();
        console::note("run `cjk-setup install` to install the binary and register the hook");
    }
    Ok(())
}
