use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::engine::DEFAULT_PRECISION;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Image loaded at startup and pre-filled in the path entry.
    #[serde(default = "default_image_path")]
    pub image_path: String,
    /// Delay between synthesized pointer events, in milliseconds. Gives the
    /// receiving surface time to register each move.
    #[serde(default = "default_pointer_delay_ms")]
    pub pointer_delay_ms: u64,
    /// How long the user gets to position the cursor on each calibration
    /// corner, in seconds.
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
    /// Default down-sampling step pre-filled in the precision entry.
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_image_path() -> String {
    "clipart.png".to_string()
}

fn default_pointer_delay_ms() -> u64 {
    1
}

fn default_settle_delay_secs() -> u64 {
    2
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
            pointer_delay_ms: default_pointer_delay_ms(),
            settle_delay_secs: default_settle_delay_secs(),
            precision: default_precision(),
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn pointer_delay(&self) -> Duration {
        Duration::from_millis(self.pointer_delay_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }
}
