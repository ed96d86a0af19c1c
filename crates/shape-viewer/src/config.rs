//! Viewer presentation settings, supplied once when the viewer is built.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::viewer::ViewerError;

/// Geographic location in degrees, height in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl Cartographic {
    pub fn from_degrees(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }
}

/// Axis-aligned range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range3d {
    pub low: [f64; 3],
    pub high: [f64; 3],
}

impl Range3d {
    pub fn new(low: [f64; 3], high: [f64; 3]) -> Self {
        Self { low, high }
    }

    /// A cube of half-size `half` centered on the origin.
    pub fn cube(half: f64) -> Self {
        Self::new([-half; 3], [half; 3])
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| !(self.low[i] < self.high[i]))
    }

    pub fn contains_point(&self, p: [f64; 3]) -> bool {
        (0..3).all(|i| self.low[i] <= p[i] && p[i] <= self.high[i])
    }
}

/// The geometry-free connection the viewer opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlankConnection {
    pub name: String,
    pub location: Cartographic,
    pub extents: Range3d,
}

impl Default for BlankConnection {
    fn default() -> Self {
        Self {
            name: "GeometryConnection".to_string(),
            location: Cartographic::from_degrees(0.0, 0.0, 0.0),
            extents: Range3d::cube(30.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewStateOptions {
    pub grid: bool,
}

impl Default for ViewStateOptions {
    fn default() -> Self {
        Self { grid: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Inherit,
}

/// Authorization settings handed to the viewer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthConfig(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub blank_connection: BlankConnection,
    pub view_state: ViewStateOptions,
    pub theme: Theme,
    pub auth: Option<AuthConfig>,
}

impl ViewerConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ViewerError> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ViewerError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.blank_connection.name.trim().is_empty() {
            return Err(ViewerError::Config {
                reason: "connection name is empty".to_string(),
            });
        }
        if self.blank_connection.extents.is_empty() {
            return Err(ViewerError::Config {
                reason: "connection extents are empty".to_string(),
            });
        }
        Ok(())
    }
}
