use std::path::{Path, PathBuf};

use crate::domain::identity::BINARY_NAME;
use crate::domain::{EnvSnapshot, Platform, UnsupportedPlatform};

/// Error from install-directory resolution.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// `$HOME` is not set but the policy needs it.
    #[error("$HOME is not set; cannot resolve an install directory")]
    HomeNotSet,
    /// `%APPDATA%` is not set on a Windows host.
    #[error("%APPDATA% is not set; cannot resolve an install directory")]
    AppDataNotSet,
    #[error(transparent)]
    Unsupported(#[from] UnsupportedPlatform),
}

/// Resolves the directory the managed binary installs into.
///
/// Policy, in priority order:
/// 1. `$XDG_BIN_HOME` when set and non-empty
/// 2. `$HOME/.local/bin` when it already exists as a directory
/// 3. fallback: `$HOME/.local/bin` on Linux/macOS,
///    `%APPDATA%\cjk-token-reducer\bin` on Windows
///
/// Pure over the snapshot apart from the step-2 existence probe, which is
/// read-only. Never creates the directory.
pub fn install_dir(env: &EnvSnapshot, platform: Platform) -> Result<PathBuf, PathError> {
    if let Some(xdg) = &env.xdg_bin_home {
        return Ok(PathBuf::from(xdg));
    }
    if let Some(home) = &env.home {
        let local_bin = Path::new(home).join(".local").join("bin");
        if local_bin.is_dir() {
            return Ok(local_bin);
        }
    }
    match platform {
        Platform::Posix => {
            let home = env.home.as_deref().ok_or(PathError::HomeNotSet)?;
            Ok(Path::new(home).join(".local").join("bin"))
        }
        Platform::Windows => {
            let appdata = env.appdata.as_deref().ok_or(PathError::AppDataNotSet)?;
            Ok(Path::new(appdata).join(BINARY_NAME).join("bin"))
        }
    }
}

/// Full path of the managed binary inside `dir`.
pub fn binary_path(dir: &Path, platform: Platform) -> PathBuf {
    dir.join(platform.binary_file_name())
}

/// Where `cargo build --release` leaves the managed binary, relative to the
/// directory the installer runs from.
pub fn artifact_path(platform: Platform) -> PathBuf {
    Path::new("target")
        .join("release")
        .join(platform.binary_file_name())
}

/// Tests whether `dir` appears as a component of the snapshot's `PATH`.
///
/// Exact component comparison, no canonicalization.
pub fn is_on_search_path(dir: &Path, env: &EnvSnapshot) -> bool {
    match &env.path {
        Some(path) => std::env::split_paths(path).any(|component| component == dir),
        None => false,
    }
}

/// Tests whether `path` exists and carries an execute bit.
///
/// On non-Unix targets existence stands in for executability.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
