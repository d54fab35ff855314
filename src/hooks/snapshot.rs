//! Snapshot, attempt, commit-or-rollback.
//!
//! Both mutation paths route through [`with_rollback`]: the settings bytes
//! are copied to a sibling backup first, the attempt runs, and on failure
//! the captured bytes are written back so the document ends byte-identical
//! to its pre-attempt state. The backup copy stays on disk in every outcome.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::HookError;

/// A point-in-time copy of the settings file.
#[derive(Debug)]
pub(crate) struct Snapshot {
    original: PathBuf,
    backup: PathBuf,
    bytes: Vec<u8>,
}

impl Snapshot {
    /// Captures the bytes of `original` and copies them to `backup`,
    /// overwriting any previous backup.
    pub(crate) fn take(original: &Path, backup: &Path) -> Result<Self, HookError> {
        let bytes = std::fs::read(original).map_err(|source| HookError::Read {
            path: original.to_path_buf(),
            source,
        })?;
        std::fs::write(backup, &bytes).map_err(|source| HookError::Backup {
            backup: backup.to_path_buf(),
            source,
        })?;
        Ok(Snapshot {
            original: original.to_path_buf(),
            backup: backup.to_path_buf(),
            bytes,
        })
    }

    /// The captured pre-attempt bytes.
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes the captured bytes back over the original file.
    fn restore(&self) -> Result<(), HookError> {
        std::fs::write(&self.original, &self.bytes).map_err(|source| HookError::Write {
            path: self.original.clone(),
            source,
        })
    }
}

/// Runs `attempt` under the protection of a fresh snapshot.
///
/// On `Err` the original file is restored before the error propagates. A
/// failed restore is logged and the backup path is left for manual
/// recovery; the attempt's error still wins.
pub(crate) fn with_rollback<T>(
    original: &Path,
    backup: &Path,
    attempt: impl FnOnce(&Snapshot) -> Result<T, HookError>,
) -> Result<T, HookError> {
    let snapshot = Snapshot::take(original, backup)?;
    match attempt(&snapshot) {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Err(restore_err) = snapshot.restore() {
                warn!(
                    "failed to restore {} after a failed update: {restore_err}; recover manually from {}",
                    snapshot.original.display(),
                    snapshot.backup.display()
                );
            }
            Err(err)
        }
    }
}
