//! The `install` pipeline: copy the built binary into place and register
//! the Claude Code hook.

use std::path::Path;

use tracing::debug;

use crate::cli::{FatalError, RunReport, StepOutcome, Warning};
use crate::console;
use crate::domain::identity::BINARY_NAME;
use crate::domain::{BinaryIdentity, EnvSnapshot, Platform};
use crate::hooks::{self, RegisterOutcome};
use crate::host;
use crate::path;

/// Runs the install pipeline. Steps execute in order; the first fatal error
/// aborts the run with nothing undone except the hook mutator's own
/// rollback.
pub fn run(env: &EnvSnapshot) -> Result<(), FatalError> {
    let mut report = RunReport::default();
    console::heading(&format!("Installing {BINARY_NAME}"));

    let claude = host::find_claude_cli().ok_or(FatalError::MissingDependency { name: "claude" })?;
    console::success(&format!("claude CLI: {}", claude.display()));

    let platform = Platform::current().map_err(path::PathError::from)?;
    let dir = path::install_dir(env, platform)?;
    debug!("resolved install directory {}", dir.display());

    report.record(ensure_install_dir(&dir));

    let artifact = path::artifact_path(platform);
    if !artifact.is_file() {
        return Err(FatalError::MissingArtifact { path: artifact });
    }

    let binary = path::binary_path(&dir, platform);
    copy_binary(&artifact, &binary)?;
    if !path::is_executable(&binary) {
        return Err(FatalError::InstallVerificationFailed {
            path: binary,
            source: None,
        });
    }
    console::success(&format!("installed {}", binary.display()));

    report.record(check_search_path(&dir, env));

    let settings = host::settings_path(env)?;
    let identity = BinaryIdentity::managed(&binary);
    match hooks::register(&settings, &identity)? {
        RegisterOutcome::Inserted => console::success(&format!(
            "registered {} hook in {}",
            hooks::HOOK_EVENT,
            settings.display()
        )),
        RegisterOutcome::AlreadyPresent => report.record(StepOutcome::Warned(Warning::new(
            "hook already registered; settings left unchanged",
        ))),
    }

    print_summary(&binary, &settings, &report);
    Ok(())
}

/// Creating the directory is best-effort; when it fails, the copy step
/// right after surfaces the real error with the path attached.
fn ensure_install_dir(dir: &Path) -> StepOutcome {
    match std::fs::create_dir_all(dir) {
        Ok(()) => StepOutcome::Passed,
        Err(err) => StepOutcome::Warned(Warning::new(format!(
            "could not create {}: {err}",
            dir.display()
        ))),
    }
}

/// Copies the artifact over the install target and marks it executable.
/// I/O failures are reported as verification failures; that is the step
/// where the user observes them.
fn copy_binary(artifact: &Path, binary: &Path) -> Result<(), FatalError> {
    std::fs::copy(artifact, binary).map_err(|source| FatalError::InstallVerificationFailed {
        path: binary.to_path_buf(),
        source: Some(source),
    })?;
    set_executable(binary)
}

#[cfg(unix)]
fn set_executable(binary: &Path) -> Result<(), FatalError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(binary, std::fs::Permissions::from_mode(0o755)).map_err(|source| {
        FatalError::InstallVerificationFailed {
            path: binary.to_path_buf(),
            source: Some(source),
        }
    })
}

#[cfg(not(unix))]
fn set_executable(_binary: &Path) -> Result<(), FatalError> {
    Ok(())
}

fn check_search_path(dir: &Path, env: &EnvSnapshot) -> StepOutcome {
    if path::is_on_search_path(dir, env) {
        StepOutcome::Passed
    } else {
        StepOutcome::Warned(Warning::with_guidance(
            format!("{} is not on your PATH", dir.display()),
            format!(
                "add it to your shell profile: export PATH=\"{}:$PATH\"",
                dir.display()
            ),
        ))
    }
}

fn print_summary(binary: &Path, settings: &Path, report: &RunReport) {
    println!();
    console::heading("Installation complete");
    console::note(&format!("binary:   {}", binary.display()));
    console::note(&format!("settings: {}", settings.display()));
    console::note(&format!(
        "hook:     {} (runs before each prompt is processed)",
        hooks::HOOK_EVENT
    ));
    console::note("restart any running Claude Code session to pick up the hook");
    console::note(&format!(
        "smoke test: echo '{{\"prompt\": \"your text\"}}' | {BINARY_NAME}"
    ));
    if report.warning_count() > 0 {
        println!();
        console::note(&format!(
            "completed with {} warning(s), see above",
            report.warning_count()
        ));
    }
}
