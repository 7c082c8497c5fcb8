//! Configuration management for the pioe image builder
//!
//! This crate handles YAML configuration parsing and validation. The
//! configuration maps family names to a run command and a list of
//! default base images; family order is preserved from the document so
//! later stages iterate deterministically.

use std::path::Path;

use indexmap::IndexMap;
use pioe_images_core::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for one image family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Command/script reference handed to the recipe template
    pub run: String,

    /// Default base images, in declared order
    pub from: Vec<String>,
}

/// Main configuration structure: family name -> family config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    /// Families in document order
    pub families: IndexMap<String, FamilyConfig>,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read config file {path:?}: {e}"),
        })?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config { message: format!("Failed to parse YAML: {e}") })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.families.is_empty() {
            return Err(Error::Config { message: "No families configured".to_string() });
        }

        for (name, family) in &self.families {
            if family.run.is_empty() {
                return Err(Error::Config {
                    message: format!("Family {name}: run command cannot be empty"),
                });
            }

            if family.from.is_empty() {
                return Err(Error::Config {
                    message: format!("Family {name}: from list cannot be empty"),
                });
            }

            if family.from.iter().any(String::is_empty) {
                return Err(Error::Config {
                    message: format!("Family {name}: base-image id cannot be empty"),
                });
            }
        }

        Ok(())
    }

    /// Look up a family by name
    pub fn family(&self, name: &str) -> Option<&FamilyConfig> {
        self.families.get(name)
    }
}
