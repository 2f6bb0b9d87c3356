//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::assets::AssetResolver;
use crate::error::{EngineError, EngineResult};

use super::types::AppConfig;

/// Loads, validates and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use paystub_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/paystubs.yaml")?;
/// println!("Listening on {}", loader.config().server.bind_address());
/// # Ok::<(), paystub_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if the YAML is invalid or a
    ///   required field is missing
    /// - [`EngineError::InvalidConfig`] if a value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Validates an already-built configuration.
    pub fn from_config(config: AppConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn validate(config: &AppConfig) -> EngineResult<()> {
        let required = [
            ("auth.user", &config.auth.user),
            ("auth.password", &config.auth.password),
            ("mail.from", &config.mail.from),
            ("assets.default_file", &config.assets.default_file),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        if !config.mail.from.contains('@') {
            return Err(EngineError::InvalidConfig {
                field: "mail.from".to_string(),
                message: format!("'{}' is not an email address", config.mail.from),
            });
        }

        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds the asset resolver described by the `assets` section.
    pub fn asset_resolver(&self) -> AssetResolver {
        let assets = &self.config.assets;
        let resolver = AssetResolver::new(&assets.dir).with_default_file(&assets.default_file);
        if assets.use_bundled {
            resolver
        } else {
            resolver.with_bundled(None)
        }
    }
}
