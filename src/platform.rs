//! # Platform-specific utilities
//!
//! Centralizza la risoluzione cross-platform del nome del binario ffmpeg e il
//! controllo della sua disponibilità.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// Platform-specific command names
pub struct PlatformCommands {
    commands: HashMap<&'static str, &'static str>,
}

impl PlatformCommands {
    /// Get the singleton instance
    pub fn instance() -> &'static Self {
        static INSTANCE: OnceLock<PlatformCommands> = OnceLock::new();
        INSTANCE.get_or_init(Self::new)
    }

    fn new() -> Self {
        let mut commands = HashMap::new();
        if cfg!(windows) {
            commands.insert("ffmpeg", "ffmpeg.exe");
        } else {
            commands.insert("ffmpeg", "ffmpeg");
        }
        Self { commands }
    }

    /// Get the platform-specific command name
    pub fn get_command<'a>(&self, base_name: &'a str) -> &'a str {
        self.commands.get(base_name).copied().unwrap_or(base_name)
    }

    /// Resolve the binary to run: an explicit override wins, otherwise the
    /// platform name is looked up on `PATH` at spawn time.
    pub fn resolve(&self, base_name: &str, override_path: Option<&Path>) -> PathBuf {
        match override_path {
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(self.get_command(base_name)),
        }
    }

    /// Check that a binary can be spawned and exits cleanly for `-version`
    pub fn is_command_available(&self, program: &Path) -> bool {
        Command::new(program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_commands() {
        let platform = PlatformCommands::instance();
        let ffmpeg = platform.get_command("ffmpeg");
        assert!(ffmpeg.starts_with("ffmpeg"));
        assert_eq!(platform.get_command("unknown-tool"), "unknown-tool");
        assert_eq!(platform.get_command("ffprobe"), "ffprobe");
    }

    #[test]
    fn test_resolve_prefers_override() {
        let platform = PlatformCommands::instance();
        let custom = Path::new("/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(platform.resolve("ffmpeg", Some(custom)), custom.to_path_buf());
        assert_eq!(
            platform.resolve("ffmpeg", None),
            PathBuf::from(platform.get_command("ffmpeg"))
        );
    }

    #[test]
    fn test_missing_binary_is_unavailable() {
        let platform = PlatformCommands::instance();
        assert!(!platform.is_command_available(Path::new("/definitely/not/here/ffmpeg")));
    }
}
