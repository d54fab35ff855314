use crate::domain::identity::BINARY_NAME;

/// Raised when the build target is neither Linux, macOS, nor Windows.
#[derive(Debug, thiserror::Error)]
#[error("unsupported platform: {0} (supported: linux, macos, windows)")]
pub struct UnsupportedPlatform(pub String);

/// Operating-system family, as far as install-path policy cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and macOS: `~/.local/bin` conventions.
    Posix,
    /// Windows: `%APPDATA%` conventions.
    Windows,
}

impl Platform {
    /// Detect the platform from `std::env::consts::OS`.
    pub fn current() -> Result<Self, UnsupportedPlatform> {
        Self::from_os(std::env::consts::OS)
    }

    fn from_os(os: &str) -> Result<Self, UnsupportedPlatform> {
        match os {
            "linux" | "macos" => Ok(Platform::Posix),
            "windows" => Ok(Platform::Windows),
            other => Err(UnsupportedPlatform(other.to_string())),
        }
    }

    /// File name of the managed binary on this platform.
    pub fn binary_file_name(&self) -> String {
        match self {
            Platform::Posix => BINARY_NAME.to_string(),
            Platform::Windows => format!("{BINARY_NAME}.exe"),
        }
    }
}
