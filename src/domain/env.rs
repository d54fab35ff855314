use std::ffi::OsString;

/// Point-in-time capture of the environment variables path resolution reads.
///
/// Taken once at startup; everything downstream is a function of this value
/// rather than of ambient process state, so resolution logic is testable
/// without mutating the test process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    pub home: Option<String>,
    pub xdg_bin_home: Option<String>,
    pub appdata: Option<String>,
    pub path: Option<OsString>,
}

impl EnvSnapshot {
    /// Capture `HOME`, `XDG_BIN_HOME`, `APPDATA`, and `PATH`.
    ///
    /// A variable that is set but empty is treated as unset, matching how
    /// shells test `${VAR:-}`.
    pub fn capture() -> Self {
        EnvSnapshot {
            home: var_non_empty("HOME"),
            xdg_bin_home: var_non_empty("XDG_BIN_HOME"),
            appdata: var_non_empty("APPDATA"),
            path: std::env::var_os("PATH"),
        }
    }
}

fn var_non_empty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
