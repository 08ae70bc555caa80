use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{olog_debug, Error, Result};

/// Upper bound on the per-position stagger.
pub const MAX_STAGGER_MS: u64 = 1000;

/// Display and value-source settings, read from `~/.odometer/odometer.toml`.
///
/// The file is optional and never written back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_interval_ms: u64,
    pub settle_ms: u64,
    pub min_value: i64,
    pub max_value: i64,
    pub initial_value: i64,
    /// Delay added per digit position before its transition starts.
    pub stagger_ms: u64,
    /// Terminal columns per glyph.
    pub glyph_width: u16,
    pub group_separator: char,
    pub currency: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            settle_ms: 500,
            min_value: -9999,
            max_value: 90000,
            initial_value: 0,
            stagger_ms: 15,
            glyph_width: 1,
            group_separator: ',',
            currency: "$".to_string(),
            seed: None,
        }
    }
}

impl Config {
    pub fn odometer_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".odometer"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::odometer_dir()?.join("odometer.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        olog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            olog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        olog_debug!(
            "Config loaded: interval={}ms settle={}ms range=[{}, {}]",
            config.tick_interval_ms,
            config.settle_ms,
            config.min_value,
            config.max_value
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_value > self.max_value {
            return Err(Error::Validation(format!(
                "min_value ({}) is greater than max_value ({})",
                self.min_value, self.max_value
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::Validation("tick_interval_ms must be > 0".into()));
        }
        if self.settle_ms == 0 {
            return Err(Error::Validation("settle_ms must be > 0".into()));
        }
        if self.stagger_ms > MAX_STAGGER_MS {
            return Err(Error::Validation(format!(
                "stagger_ms ({}) exceeds {}",
                self.stagger_ms, MAX_STAGGER_MS
            )));
        }
        if self.glyph_width == 0 {
            return Err(Error::Validation("glyph_width must be > 0".into()));
        }
        if self.group_separator.is_ascii_digit() || self.group_separator == '-' {
            return Err(Error::Validation(format!(
                "group_separator '{}' would be ambiguous",
                self.group_separator
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}
