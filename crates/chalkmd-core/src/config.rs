//! Configuration types for the vault manager.
//!
//! Follows a builder pattern for configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What `delete_file` does with its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Move to the platform recycle bin, removing permanently only if that fails
    #[default]
    Trash,
    /// Remove immediately
    Permanent,
}

/// How resolved paths are checked against the vault root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainmentMode {
    /// Textual, component-wise prefix check after lexical normalization
    #[default]
    Lexical,
    /// Lexical check, then the same check on symlink-resolved paths
    Canonical,
}

/// Vault manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub delete_mode: DeleteMode,
    pub containment: ContainmentMode,
    /// Extension `create_file` guarantees, including the leading dot
    pub note_extension: String,
    pub log_level: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            delete_mode: DeleteMode::Trash,
            containment: ContainmentMode::Lexical,
            note_extension: ".md".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ManagerConfig {
    /// Start a builder from the defaults
    pub fn builder() -> ManagerConfigBuilder {
        ManagerConfigBuilder {
            config: Self::default(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let ext = &self.note_extension;
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(Error::config_error(format!(
                "note_extension must be a dot followed by a name, got '{}'",
                ext
            )));
        }
        if ext.contains('/') || ext.contains('\\') {
            return Err(Error::config_error(format!(
                "note_extension must not contain path separators, got '{}'",
                ext
            )));
        }
        if self.log_level.trim().is_empty() {
            return Err(Error::config_error("log_level cannot be empty"));
        }
        Ok(())
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as YAML
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize configuration: {}", e)))?;

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to save configuration to {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Builder for ManagerConfig
pub struct ManagerConfigBuilder {
    config: ManagerConfig,
}

impl ManagerConfigBuilder {
    pub fn delete_mode(mut self, mode: DeleteMode) -> Self {
        self.config.delete_mode = mode;
        self
    }

    pub fn containment(mut self, mode: ContainmentMode) -> Self {
        self.config.containment = mode;
        self
    }

    pub fn note_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.note_extension = ext.into();
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<ManagerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
