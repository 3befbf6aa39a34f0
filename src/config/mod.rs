//! Configuration - where the data lives and how the tree looks.
//!
//! ```toml
//! data_file = "guests.dat"
//! rooms = [101, 102, 103]
//!
//! [display]
//! date_format = "%d.%m.%Y"
//! room_font = "Sans Bold 11"
//! normal_font = "Sans 10"
//!
//! [layout]
//! header_height = 28.0
//! row_height = 24.0
//! column_widths = [160, 160, 100, 120, 120, 120]
//! ```

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::guest::RoomNumber;
use crate::interaction::{TreeLayout, DEFAULT_HEADER_HEIGHT, DEFAULT_ROW_HEIGHT};
use crate::tree::{standard_columns, Column, DisplayFormat, COLUMN_COUNT, DEFAULT_COLUMN_WIDTHS};

/// Error type for loading and saving configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
    /// A value parsed but is not usable.
    Invalid { key: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "config io error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "config parse error: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "config serialize error: {}", msg),
            ConfigError::Invalid { key, reason } => write!(f, "invalid {}: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub header_height: f64,
    pub row_height: f64,
    pub column_widths: [u32; COLUMN_COUNT],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            column_widths: DEFAULT_COLUMN_WIDTHS,
        }
    }
}

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestBookConfig {
    /// Flat file holding rooms and guests.
    pub data_file: PathBuf,
    /// Rooms that always exist, whether or not the data file mentions them.
    pub rooms: Vec<RoomNumber>,
    pub display: DisplayFormat,
    pub layout: LayoutConfig,
}

impl Default for GuestBookConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("guests.dat"),
            rooms: Vec::new(),
            display: DisplayFormat::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl GuestBookConfig {
    /// Load from `path`, falling back to defaults when the file is missing.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GuestBookConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid {
                key: "display.date_format",
                reason: format!("unsupported pattern {:?}", self.display.date_format),
            });
        }
        if !(self.layout.row_height > 0.0) {
            return Err(ConfigError::Invalid {
                key: "layout.row_height",
                reason: "must be positive".to_string(),
            });
        }
        if !(self.layout.header_height >= 0.0) {
            return Err(ConfigError::Invalid {
                key: "layout.header_height",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn columns(&self) -> Vec<Column> {
        standard_columns(self.layout.column_widths)
    }

    pub fn tree_layout(&self) -> TreeLayout {
        TreeLayout::new(self.layout.header_height, self.layout.row_height)
    }
}
