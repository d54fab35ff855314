//! Facts about the host this tool integrates with: where the Claude Code
//! CLI and settings live, and what the managed binary leaves on disk.

use std::path::{Path, PathBuf};

use crate::domain::identity::BINARY_NAME;
use crate::domain::EnvSnapshot;
use crate::path::PathError;

/// Name of the Claude Code CLI executable.
const CLAUDE_CLI: &str = "claude";

/// Locates the Claude Code CLI through `PATH`.
pub(crate) fn find_claude_cli() -> Option<PathBuf> {
    which::which(CLAUDE_CLI).ok()
}

/// `~/.claude/settings.json` under the snapshot's home directory.
pub(crate) fn settings_path(env: &EnvSnapshot) -> Result<PathBuf, PathError> {
    let home = env.home.as_deref().ok_or(PathError::HomeNotSet)?;
    Ok(Path::new(home).join(".claude").join("settings.json"))
}

/// Paths the managed binary creates at runtime and uninstall deliberately
/// leaves behind. Resolved the same way the binary itself resolves them.
pub(crate) fn residual_data_paths() -> Vec<(&'static str, PathBuf)> {
    let mut paths = Vec::new();
    if let Some(cache) = dirs::cache_dir() {
        paths.push(("translation cache", cache.join(BINARY_NAME)));
    }
    if let Some(config) = dirs::config_dir() {
        paths.push(("statistics and settings", config.join(BINARY_NAME)));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(("per-user config file", home.join(".cjk-token.json")));
    }
    paths
}
