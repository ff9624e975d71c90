use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 60;
const MIN_TICK_MS: u64 = 100;
const MAX_TICK_MS: u64 = 1000;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Minutes pre-filled in the new cycle form
    #[serde(default = "default_minutes")]
    pub default_minutes: u32,
    /// Countdown sampling cadence
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_true")]
    pub notifications: bool,
    /// Extra task labels offered alongside history
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_minutes() -> u32 {
    25
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_minutes: default_minutes(),
            tick_ms: default_tick_ms(),
            notifications: true,
            suggestions: Vec::new(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Pull out-of-range values back into bounds
    pub fn clamped(mut self) -> Self {
        self.default_minutes = self.default_minutes.clamp(MIN_MINUTES, MAX_MINUTES);
        self.tick_ms = self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS);
        self
    }

    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms)
    }
}

/// Load settings from settings.json, defaults when the file is absent
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file: {}", path.display()))?;
    Ok(settings.clamped())
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}
