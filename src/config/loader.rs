//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AdminSeed, AppConfig, ServerConfig};

/// Loads and provides access to the engine configuration.
///
/// # File layout
///
/// ```text
/// server:
///   host: 0.0.0.0
///   port: 3000
/// admin:
///   id: admin-1
///   name: System Admin
///   email: admin@admin.com
///   password: pass1234
///   pin: "0000"
///   birthday: 2000-01-01
/// ```
///
/// Every key is optional; missing keys fall back to the defaults above
/// (with `host` defaulting to `127.0.0.1`).
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Listening on {}", loader.server().bind_address());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the YAML file at `path`.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid configuration YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config = Self::load_yaml::<AppConfig>(path.as_ref())?;
        Self::from_config(config)
    }

    /// Parses configuration from an inline YAML string.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        let config = serde_yaml::from_str::<AppConfig>(yaml).map_err(|e| {
            EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            }
        })?;
        Self::from_config(config)
    }

    /// Wraps an already-built configuration after validating the admin seed.
    pub fn from_config(config: AppConfig) -> EngineResult<Self> {
        config
            .admin
            .to_user(chrono::Utc::now())
            .validate()
            .map_err(|e| EngineError::ConfigParseError {
                path: "admin".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the listener settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the admin seed.
    pub fn admin(&self) -> &AdminSeed {
        &self.config.admin
    }
}
