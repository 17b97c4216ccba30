//! Configuration management

use crate::{LectorError, Result};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration for the reader
///
/// Manages persistent settings: speech parameters and playback timing.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.lector.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path, creating it with defaults
    /// when missing
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| LectorError::Config(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| LectorError::Config(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Get config file path (~/.lector.cfg)
    fn config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".lector.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| LectorError::Config(format!("Failed to save config: {}", e)))
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("language", "english")
            .set("voice", "")
            .set("rate", "50");

        ini.with_section(Some("playback"))
            .set("tick_ms", "200")
            .set("gap_secs", "1.0");

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get a float value from config
    pub fn get_float(&self, section: &str, key: &str, default: f32) -> f32 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Reader-specific configuration getters

    /// Language name used to pick a voice when none is set explicitly
    pub fn language(&self) -> String {
        self.get_string("speech", "language", "english")
    }

    /// Explicit synthesizer voice id; empty means derive from language
    pub fn voice(&self) -> Option<String> {
        let voice = self.get_string("speech", "voice", "");
        if voice.is_empty() {
            None
        } else {
            Some(voice)
        }
    }

    /// Speech rate (0-100, where 50 is normal)
    pub fn rate(&self) -> u8 {
        self.get_int("speech", "rate", 50).clamp(0, 100) as u8
    }

    /// Engine tick period
    pub fn tick(&self) -> Duration {
        let ms = self.get_int("playback", "tick_ms", 200).max(1) as u64;
        Duration::from_millis(ms)
    }

    /// Pause between documents
    pub fn gap(&self) -> Duration {
        let secs = self.get_float("playback", "gap_secs", 1.0).max(0.0);
        Duration::from_secs_f32(secs)
    }
}
