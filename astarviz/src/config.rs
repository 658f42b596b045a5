//! TOML configuration.
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) yields the stock setup:
//!
//! ```toml
//! log_file = "astarviz.log"
//!
//! [board]
//! size = "medium"          # small | medium | large
//!
//! [reveal]
//! interval_ms = 80
//!
//! [display]
//! status_bar = true
//!
//! [colors]
//! start = "#00b3b3"
//! goal  = "#ff6666"
//! wall  = "#141f1f"
//! path  = "#33ff33"
//! empty = "#ffffff"
//! empty_alt = "#eef2f2"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, VizError};
use crate::preset::BoardSize;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "astarviz.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct VizConfig {
    pub board: BoardConfig,
    pub reveal: RevealConfig,
    pub display: DisplayConfig,
    pub colors: ColorsConfig,
    /// Where the terminal binary writes its log. The window binary logs to
    /// stderr.
    pub log_file: String,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            reveal: RevealConfig::default(),
            display: DisplayConfig::default(),
            colors: ColorsConfig::default(),
            log_file: "astarviz.log".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub size: BoardSize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between two revealed path cells.
    pub interval_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { interval_ms: 80 }
    }
}

impl RevealConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the help/status line above the board.
    pub status_bar: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { status_bar: true }
    }
}

/// Role colours as `#rrggbb` strings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorsConfig {
    pub start: String,
    pub goal: String,
    pub wall: String,
    pub path: String,
    pub empty: String,
    pub empty_alt: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            start: "#00b3b3".into(),
            goal: "#ff6666".into(),
            wall: "#141f1f".into(),
            path: "#33ff33".into(),
            empty: "#ffffff".into(),
            empty_alt: "#eef2f2".into(),
        }
    }
}

impl VizConfig {
    /// Parse a TOML document.
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        if config.reveal.interval_ms == 0 {
            return Err(VizError::Config("reveal.interval_ms must be positive".into()));
        }
        Ok(config)
    }

    /// Load from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
