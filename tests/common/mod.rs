// Shared harness for integration tests driving the compiled binary.
// Each sandbox is an isolated HOME/PATH/working directory, so runs never
// touch the developer's real settings.
#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

pub const BINARY_NAME: &str = "cjk-token-reducer";

pub fn installer_binary() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_cjk-setup"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// An isolated environment for one test: a fake home, a shim directory
/// standing in for PATH, and a working directory with (optionally) a fake
/// release artifact in it.
pub struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("failed to create sandbox");
        let sandbox = Sandbox { root };
        std::fs::create_dir_all(sandbox.home()).unwrap();
        std::fs::create_dir_all(sandbox.shim_dir()).unwrap();
        std::fs::create_dir_all(sandbox.workdir()).unwrap();
        sandbox
    }

    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn shim_dir(&self) -> PathBuf {
        self.root.path().join("shims")
    }

    pub fn workdir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home().join(".claude").join("settings.json")
    }

    pub fn register_backup_path(&self) -> PathBuf {
        self.home().join(".claude").join("settings.json.backup")
    }

    pub fn uninstall_backup_path(&self) -> PathBuf {
        self.home()
            .join(".claude")
            .join("settings.json.before-uninstall")
    }

    /// Where the install pipeline lands the binary: the sandbox home has no
    /// pre-existing `.local/bin`, so resolution falls back to creating it.
    pub fn install_dir(&self) -> PathBuf {
        self.home().join(".local").join("bin")
    }

    pub fn installed_binary(&self) -> PathBuf {
        self.install_dir().join(BINARY_NAME)
    }

    /// Drops a fake `claude` executable onto the sandbox PATH.
    pub fn with_claude_shim(self) -> Self {
        self.write_executable(&self.shim_dir().join("claude"));
        self
    }

    /// Drops a fake release artifact where `cargo build --release` would.
    pub fn with_artifact(self) -> Self {
        let artifact = self.workdir().join("target").join("release").join(BINARY_NAME);
        std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        self.write_executable(&artifact);
        self
    }

    fn write_executable(&self, path: &std::path::Path) {
        std::fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    pub fn write_settings(&self, doc: &Value) {
        let path = self.settings_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut rendered = serde_json::to_string_pretty(doc).unwrap();
        rendered.push('\n');
        std::fs::write(path, rendered).unwrap();
    }

    pub fn write_settings_raw(&self, raw: &str) {
        let path = self.settings_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, raw).unwrap();
    }

    pub fn read_settings(&self) -> Value {
        let raw = std::fs::read_to_string(self.settings_path()).expect("settings file missing");
        serde_json::from_str(&raw).expect("settings file is not valid JSON")
    }

    pub fn read_settings_bytes(&self) -> Vec<u8> {
        std::fs::read(self.settings_path()).expect("settings file missing")
    }

    /// Runs the binary with the given args and stdin inside the sandbox.
    /// Returns (stdout, stderr, exit_code). The environment is rebuilt from
    /// scratch: only HOME and PATH point into the sandbox.
    pub fn run(&self, args: &[&str], stdin_input: &str) -> (String, String, i32) {
        let mut child = Command::new(installer_binary())
            .args(args)
            .current_dir(self.workdir())
            .env_clear()
            .env("HOME", self.home())
            .env("PATH", self.shim_dir())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn cjk-setup");

        child
            .stdin
            .as_mut()
            .unwrap()
            .write_all(stdin_input.as_bytes())
            .expect("failed to write stdin");

        let output = child.wait_with_output().expect("failed to wait for cjk-setup");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            output.status.code().unwrap_or(-1),
        )
    }
}

/// Count of hook entries under UserPromptSubmit whose command mentions the
/// managed binary, across all groups.
pub fn matching_entry_count(doc: &Value) -> usize {
    doc["hooks"]["UserPromptSubmit"]
        .as_array()
        .map(|groups| {
            groups
                .iter()
                .filter_map(|group| group["hooks"].as_array())
                .flatten()
                .filter(|entry| {
                    entry["command"]
                        .as_str()
                        .is_some_and(|command| command.ends_with(BINARY_NAME))
                })
                .count()
        })
        .unwrap_or(0)
}
