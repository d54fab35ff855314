//! Idempotent registration of the managed binary as a Claude Code
//! `UserPromptSubmit` hook in `~/.claude/settings.json`.
//!
//! Mutations snapshot the settings file to a sibling backup first and
//! restore it byte-for-byte when any later step fails. Reads and writes are
//! not synchronized across processes; concurrent invocations race on the
//! read-modify-write.

pub mod document;
mod snapshot;

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::BinaryIdentity;

pub use document::HOOK_EVENT;

/// Suffix of the sibling backup written before registration.
pub const REGISTER_BACKUP_SUFFIX: &str = "backup";
/// Suffix of the sibling backup written before deregistration.
pub const DEREGISTER_BACKUP_SUFFIX: &str = "before-uninstall";

/// Errors from reading, parsing, transforming, or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to back up settings to {backup}")]
    Backup {
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file is not valid JSON")]
    Parse(#[source] serde_json::Error),
    #[error("unexpected settings structure: {0}")]
    Shape(String),
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new entry was written.
    Inserted,
    /// An entry matching the identity already existed; nothing was written.
    AlreadyPresent,
}

/// Outcome of a deregistration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeregisterOutcome {
    /// At least one matching entry was removed.
    Removed,
    /// No matching entry existed; the document was not rewritten.
    NotPresent,
}

/// Registers the managed binary under the `UserPromptSubmit` event.
///
/// Idempotent: a document already containing either identity form is left
/// untouched. A missing settings file is first created with a minimal
/// skeleton, then treated like any other document. The pre-mutation bytes
/// are copied to `settings.json.backup`; any failure past that point
/// restores them, so the document never ends half-written.
///
/// A settings file that fails to parse is not reported as absent here; the
/// parse error surfaces from the protected mutation below, after the backup
/// exists.
pub fn register(settings: &Path, identity: &BinaryIdentity) -> Result<RegisterOutcome, HookError> {
    if let Ok(doc) = read_document(settings) {
        if document::contains_entry(&doc, identity) {
            debug!("hook already registered in {}", settings.display());
            return Ok(RegisterOutcome::AlreadyPresent);
        }
    }

    ensure_settings_file(settings)?;

    let backup = backup_path(settings, REGISTER_BACKUP_SUFFIX);
    let command = identity.install_path().display().to_string();
    snapshot::with_rollback(settings, &backup, |snapshot| {
        let mut doc = parse(snapshot.bytes())?;
        document::insert_entry(&mut doc, &command)?;
        write_document(settings, &doc)
    })?;

    info!("registered {HOOK_EVENT} hook in {}", settings.display());
    Ok(RegisterOutcome::Inserted)
}

/// Removes every hook entry matching the identity.
///
/// Short-circuits to `NotPresent` when the file is absent or its raw bytes
/// do not even contain the binary name. Once presence is suspected the
/// bytes are copied to `settings.json.before-uninstall`; a structural miss
/// after that still returns `NotPresent` without rewriting the document.
/// Failures past the backup restore the original bytes, mirroring
/// [`register`].
pub fn deregister(
    settings: &Path,
    identity: &BinaryIdentity,
) -> Result<DeregisterOutcome, HookError> {
    if !settings.exists() {
        return Ok(DeregisterOutcome::NotPresent);
    }
    let raw = std::fs::read_to_string(settings).map_err(|source| HookError::Read {
        path: settings.to_path_buf(),
        source,
    })?;
    if !raw.contains(identity.name()) {
        debug!("no textual trace of {} in {}", identity, settings.display());
        return Ok(DeregisterOutcome::NotPresent);
    }

    let backup = backup_path(settings, DEREGISTER_BACKUP_SUFFIX);
    let outcome = snapshot::with_rollback(settings, &backup, |snapshot| {
        let mut doc = parse(snapshot.bytes())?;
        if document::remove_entries(&mut doc, identity) == 0 {
            return Ok(DeregisterOutcome::NotPresent);
        }
        document::prune_empty(&mut doc);
        write_document(settings, &doc)?;
        Ok(DeregisterOutcome::Removed)
    })?;

    if outcome == DeregisterOutcome::Removed {
        info!("removed {HOOK_EVENT} hook from {}", settings.display());
    }
    Ok(outcome)
}

/// Registration state as seen by a read-only query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Registered,
    NotRegistered,
    /// The settings file exists but could not be parsed.
    Unreadable,
}

/// Structural presence check; never writes.
pub fn registration_state(settings: &Path, identity: &BinaryIdentity) -> RegistrationState {
    if !settings.exists() {
        return RegistrationState::NotRegistered;
    }
    match read_document(settings) {
        Ok(doc) if document::contains_entry(&doc, identity) => RegistrationState::Registered,
        Ok(_) => RegistrationState::NotRegistered,
        Err(_) => RegistrationState::Unreadable,
    }
}

/// Sibling path carrying the given suffix: `settings.json` with suffix
/// `backup` becomes `settings.json.backup`.
pub fn backup_path(settings: &Path, suffix: &str) -> PathBuf {
    let mut name = settings.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    settings.with_file_name(name)
}

/// Creates the settings file with the minimal skeleton when absent,
/// creating parent directories as needed. Existing files are untouched.
fn ensure_settings_file(settings: &Path) -> Result<(), HookError> {
    if settings.exists() {
        return Ok(());
    }
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent).map_err(|source| HookError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    debug!("creating settings skeleton at {}", settings.display());
    write_document(settings, &document::empty_document())
}

fn read_document(settings: &Path) -> Result<Value, HookError> {
    let bytes = std::fs::read(settings).map_err(|source| HookError::Read {
        path: settings.to_path_buf(),
        source,
    })?;
    parse(&bytes)
}

fn parse(bytes: &[u8]) -> Result<Value, HookError> {
    serde_json::from_slice(bytes).map_err(HookError::Parse)
}

/// Serializes with two-space indentation and a trailing newline, the form
/// Claude Code itself writes.
///
/// # Panics
///
/// Panics if serialization fails, which cannot happen for a pure
/// `serde_json::Value` tree. This is an invariant, not a runtime error.
fn write_document(settings: &Path, doc: &Value) -> Result<(), HookError> {
    let mut rendered =
        serde_json::to_string_pretty(doc).expect("JSON value serialization cannot fail");
    rendered.push('\n');
    std::fs::write(settings, rendered).map_err(|source| HookError::Write {
        path: settings.to_path_buf(),
        source,
    })
}

impl std::fmt::Display for RegisterOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterOutcome::Inserted => write!(f, "hook registered"),
            RegisterOutcome::AlreadyPresent => write!(f, "hook already registered"),
        }
    }
}

impl std::fmt::Display for DeregisterOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeregisterOutcome::Removed => write!(f, "hook removed"),
            DeregisterOutcome::NotPresent => write!(f, "hook was not registered"),
        }
    }
}
