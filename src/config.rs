//! Server configuration
//!
//! All tunables for a running evaluation server. The maximum session
//! duration varies per deployment (short runs for benchmarks, hours for
//! soak tests), so it is configuration rather than a constant.

use std::path::PathBuf;
use std::time::Duration;

/// Default maximum session duration (5 minutes)
pub const DEFAULT_MAX_SESSION_SECS: u64 = 5 * 60;

/// Base directory that per-session output directories are created under
pub const DEFAULT_OUTPUT_DIR: &str = "gameplay_sessions";

/// Subdirectory of each session directory holding per-step screenshots
pub const IMAGES_FOLDER: &str = "images";

/// Capacity of the observer broadcast channel
pub const BROADCAST_CAPACITY: usize = 1024;

/// Configuration for the evaluation server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the game ROM handed to the environment factory
    pub rom_path: PathBuf,

    /// Base directory for per-session output (CSV log, summary, images)
    pub output_dir: PathBuf,

    /// Hard cap on session length; a session that outlives this is
    /// forcibly torn down and subsequent actions receive the timeout
    /// sentinel
    pub max_session_duration: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            rom_path: PathBuf::from("Pokemon_Red.gb"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_session_duration: Duration::from_secs(DEFAULT_MAX_SESSION_SECS),
        }
    }
}

impl ServerConfig {
    /// Config with a custom session duration, keeping the other defaults
    #[must_use]
    pub fn with_max_session_duration(mut self, duration: Duration) -> Self {
        self.max_session_duration = duration;
        self
    }

    /// Config with a custom output directory, keeping the other defaults
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Config with a custom ROM path, keeping the other defaults
    #[must_use]
    pub fn with_rom_path(mut self, rom: impl Into<PathBuf>) -> Self {
        self.rom_path = rom.into();
        self
    }
}
