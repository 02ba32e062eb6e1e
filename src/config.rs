//! Application configuration.
//!
//! Every field has a default, so an empty (or missing) config file yields the
//! stock timings: 60 Hz ticks, 0.8 s reveals, 2 s count-ups, 2 s copy
//! acknowledgement, 10% section visibility threshold.
//!
//! ```toml
//! content = "me.toml"
//! theme = "portfolio"
//!
//! [animation]
//! tick_rate = 60
//! reveal_duration_secs = 0.8
//! count_up_duration_secs = 2.0
//! section_threshold = 0.1
//!
//! [contact]
//! copied_ack_secs = 2.0
//!
//! [logging]
//! file = "folio.log"
//! filter = "folio_tui=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::theme::{self, Theme};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Optional TOML file replacing the built-in portfolio content.
    pub content: Option<PathBuf>,
    /// Theme preset name; `portfolio` when unset.
    pub theme: Option<String>,
    pub animation: AnimationConfig,
    pub contact: ContactConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Count-up ticks per second.
    pub tick_rate: u32,
    pub reveal_duration_secs: f64,
    /// Rows a hidden block sits below its resting position.
    pub reveal_offset_rows: u16,
    pub count_up_duration_secs: f64,
    /// Visible fraction a section needs before it reveals.
    pub section_threshold: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            reveal_duration_secs: 0.8,
            reveal_offset_rows: 3,
            count_up_duration_secs: 2.0,
            section_threshold: 0.1,
        }
    }
}

impl AnimationConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate as f64)
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_secs_f64(self.reveal_duration_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub copied_ack_secs: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self { copied_ack_secs: 2.0 }
    }
}

impl ContactConfig {
    pub fn copied_ack(&self) -> Duration {
        Duration::from_secs_f64(self.copied_ack_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    /// EnvFilter directive, e.g. `folio_tui=debug`.
    pub filter: Option<String>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured theme preset.
    pub fn theme(&self) -> Result<Theme> {
        match &self.theme {
            None => Ok(Theme::default()),
            Some(name) => theme::get_preset(name).ok_or_else(|| {
                FolioError::config(format!(
                    "unknown theme '{name}' (available: {})",
                    theme::preset_names().join(", ")
                ))
            }),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.theme()?;
        let anim = &self.animation;
        if anim.tick_rate == 0 {
            return Err(FolioError::config("animation.tick_rate must be positive"));
        }
        if !(anim.reveal_duration_secs > 0.0) {
            return Err(FolioError::config(
                "animation.reveal_duration_secs must be positive",
            ));
        }
        if !(anim.count_up_duration_secs > 0.0) {
            return Err(FolioError::config(
                "animation.count_up_duration_secs must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&anim.section_threshold) {
            return Err(FolioError::config(
                "animation.section_threshold must be within 0.0..=1.0",
            ));
        }
        if !(self.contact.copied_ack_secs > 0.0) {
            return Err(FolioError::config("contact.copied_ack_secs must be positive"));
        }
        Ok(())
    }
}
