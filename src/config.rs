//! Seat map configuration (`seatmap.toml`).
//!
//! Every key is optional; anything missing falls back to the defaults below.
//!
//! ```toml
//! rows = 12
//! seats_per_row = 20
//! seat_size = 24.0
//! aisle_every = 10
//! ```

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a seat map configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("config parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values that parse but cannot produce a seat map
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeatMapConfig {
    pub rows: u32,
    pub seats_per_row: u32,
    /// Edge length of a square seat, in px.
    pub seat_size: f64,
    pub seat_gap: f64,
    /// Insert an aisle after every N seats in a row; 0 disables aisles.
    pub aisle_every: u32,
    pub aisle_width: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Default for SeatMapConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            seats_per_row: 16,
            seat_size: 28.0,
            seat_gap: 6.0,
            aisle_every: 8,
            aisle_width: 24.0,
            origin_x: 40.0,
            origin_y: 40.0,
        }
    }
}

impl SeatMapConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SeatMapConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::info!(path = %path.display(), "loaded seat map config");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::Invalid("rows must be at least 1".into()));
        }
        if self.seats_per_row == 0 {
            return Err(ConfigError::Invalid("seats_per_row must be at least 1".into()));
        }
        if !self.seat_size.is_finite() || self.seat_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "seat_size must be a positive number, got {}",
                self.seat_size
            )));
        }
        for (name, value) in [
            ("seat_gap", self.seat_gap),
            ("aisle_width", self.aisle_width),
            ("origin_x", self.origin_x),
            ("origin_y", self.origin_y),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }
        Ok(())
    }
}
