use std::path::{Path, PathBuf};

/// Name of the binary this tool installs and registers.
pub const BINARY_NAME: &str = "cjk-token-reducer";

/// The command strings that denote the managed hook in settings.
///
/// Claude Code stores each hook as a free-form command string. Depending on
/// which installer version wrote it, that string is either the bare binary
/// name (resolved through `PATH` at hook time) or the fully-qualified install
/// path. Both forms refer to the same hook and must be treated as equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryIdentity {
    name: String,
    install_path: PathBuf,
}

impl BinaryIdentity {
    pub fn new(name: &str, install_path: &Path) -> Self {
        BinaryIdentity {
            name: name.to_string(),
            install_path: install_path.to_path_buf(),
        }
    }

    /// The managed binary under its standard name at the given install path.
    pub fn managed(install_path: &Path) -> Self {
        Self::new(BINARY_NAME, install_path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Tests whether a hook command string denotes this binary.
    ///
    /// Exact match on the bare name or on the install path (path comparison
    /// is component-wise, so a trailing separator does not defeat it). No
    /// substring matching: a wrapper named `my-cjk-token-reducer` is a
    /// different hook.
    pub fn matches(&self, command: &str) -> bool {
        command == self.name || Path::new(command) == self.install_path
    }
}

impl std::fmt::Display for BinaryIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
