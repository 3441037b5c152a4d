//! Perspective configuration.
//!
//! Loaded from JSON, or from TOML with the `toml-config` feature:
//!
//! ```toml
//! id = "general"
//!
//! [navigation]
//! size = 250.0
//!
//! [tooling]
//! size = 260.0
//! hidden = true
//! ```
//!
//! Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default perspective identifier.
pub const DEFAULT_PERSPECTIVE_ID: &str = "general";

/// Initial geometry of one sizeable zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Initial size in zone-local units.
    pub size: f64,
    /// Whether the zone starts collapsed.
    pub hidden: bool,
}

impl ZoneConfig {
    #[must_use]
    pub fn new(size: f64) -> Self {
        Self {
            size,
            hidden: false,
        }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self::new(250.0)
    }
}

/// Identifier and initial zone geometry of a perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveConfig {
    /// Identifier matched against part placement rules.
    pub id: String,
    pub navigation: ZoneConfig,
    pub information: ZoneConfig,
    pub tooling: ZoneConfig,
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_PERSPECTIVE_ID.to_owned(),
            navigation: ZoneConfig::new(250.0),
            information: ZoneConfig::new(200.0),
            tooling: ZoneConfig::new(250.0),
        }
    }
}

impl PerspectiveConfig {
    /// Default geometry under a different identifier.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Check every parameter. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.trim().is_empty() {
            errors.push("id must not be empty".to_owned());
        }
        for (name, zone) in [
            ("navigation", &self.navigation),
            ("information", &self.information),
            ("tooling", &self.tooling),
        ] {
            if !zone.size.is_finite() || zone.size < 0.0 {
                errors.push(format!("{name}.size must be finite and >= 0, got {}", zone.size));
            }
        }
        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
