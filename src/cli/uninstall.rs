//! The `uninstall` pipeline: confirm, deregister the hook, remove the
//! binary, and point at what stays behind.

use std::io::{BufRead, IsTerminal};

use crate::cli::{FatalError, RunReport, StepOutcome, Warning};
use crate::console;
use crate::domain::identity::BINARY_NAME;
use crate::domain::{BinaryIdentity, EnvSnapshot, Platform};
use crate::hooks::{self, DeregisterOutcome};
use crate::host;
use crate::path;

/// How an uninstall run ended. Declining the prompt is an ordinary outcome
/// with exit code 0, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    Completed,
    Declined,
}

pub fn run(env: &EnvSnapshot) -> Result<UninstallOutcome, FatalError> {
    if !confirm() {
        console::note("uninstall cancelled; nothing was changed");
        return Ok(UninstallOutcome::Declined);
    }

    let mut report = RunReport::default();
    let platform = Platform::current().map_err(path::PathError::from)?;
    let dir = path::install_dir(env, platform)?;
    let binary = path::binary_path(&dir, platform);

    // Deregister before touching the binary: Claude Code must never hold a
    // hook entry pointing at a file that is already gone.
    let settings = host::settings_path(env)?;
    let identity = BinaryIdentity::managed(&binary);
    match hooks::deregister(&settings, &identity)? {
        DeregisterOutcome::Removed => console::success(&format!(
            "removed {} hook from {}",
            hooks::HOOK_EVENT,
            settings.display()
        )),
        DeregisterOutcome::NotPresent => report.record(StepOutcome::Warned(Warning::new(
            "no hook entry found in settings",
        ))),
    }

    if binary.exists() {
        match std::fs::remove_file(&binary) {
            Ok(()) => console::success(&format!("removed {}", binary.display())),
            Err(err) => report.record(StepOutcome::Warned(Warning::with_guidance(
                format!("could not remove {}: {err}", binary.display()),
                format!("remove it manually: rm {}", binary.display()),
            ))),
        }
    } else {
        report.record(StepOutcome::Warned(Warning::new(format!(
            "binary already absent: {}",
            binary.display()
        ))));
    }

    print_residual_guidance();
    Ok(UninstallOutcome::Completed)
}

/// Asks before changing anything; the default answer is no.
///
/// On a terminal this is an interactive yes/no prompt. With piped stdin one
/// line is read and only `y`/`yes` (case-insensitive) goes ahead, so
/// scripted runs stay explicit.
fn confirm() -> bool {
    let prompt = format!("Remove {BINARY_NAME} and its Claude Code hook?");
    if std::io::stdin().is_terminal() {
        return dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);
    }
    eprintln!("{prompt} [y/N]");
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Data the managed binary created at runtime stays on disk; deleting it is
/// the user's call, not this tool's.
fn print_residual_guidance() {
    println!();
    console::heading("Left on disk");
    for (label, path) in host::residual_data_paths() {
        console::note(&format!("{label}: {}", path.display()));
    }
    console::note("remove these manually if you want a clean slate");
}
