// src/core/config.rs

use crate::core::common::SqlScriptError;
use crate::core::session::CatalogConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Engine compatibility version used when none is configured.
pub const DEFAULT_HIVE_VERSION: &str = "1.1.0";

/// Name under which the startup hive catalog is registered.
pub const HIVE_CATALOG_NAME: &str = "hive_catalog";

/// Launcher configuration.
///
/// Built once from command-line flags (optionally layered over a TOML file)
/// and handed to the runner. Nothing here is global.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Script to run.
    pub sql: Option<PathBuf>,
    /// Hive metastore configuration directory. Enables startup catalog registration.
    pub hive_conf: Option<PathBuf>,
    pub hive_version: String,
    /// Echo every statement before it is dispatched.
    pub echo: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            sql: None,
            hive_conf: None,
            hive_version: DEFAULT_HIVE_VERSION.to_string(),
            echo: true,
        }
    }
}

/// Builder for [`LauncherConfig`]. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct LauncherConfigBuilder {
    sql: Option<PathBuf>,
    hive_conf: Option<PathBuf>,
    hive_version: Option<String>,
    echo: Option<bool>,
}

impl LauncherConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the script path
    pub fn sql<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.sql = Some(path.into());
        self
    }

    /// Sets the hive configuration directory
    pub fn hive_conf<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.hive_conf = Some(path.into());
        self
    }

    /// Sets the hive version string
    pub fn hive_version<S: Into<String>>(mut self, version: S) -> Self {
        self.hive_version = Some(version.into());
        self
    }

    pub fn echo(mut self, enabled: bool) -> Self {
        self.echo = Some(enabled);
        self
    }

    /// Builds the config and validates it.
    pub fn build(self) -> Result<LauncherConfig, SqlScriptError> {
        let defaults = LauncherConfig::default();
        let config = LauncherConfig {
            sql: self.sql,
            hive_conf: self.hive_conf,
            hive_version: self.hive_version.unwrap_or(defaults.hive_version),
            echo: self.echo.unwrap_or(defaults.echo),
        };

        config.validate()?;
        Ok(config)
    }
}

impl LauncherConfig {
    pub fn builder() -> LauncherConfigBuilder {
        LauncherConfigBuilder::new()
    }

    /// Seeds a builder with this config's values so individual fields can be overridden.
    pub fn to_builder(&self) -> LauncherConfigBuilder {
        LauncherConfigBuilder {
            sql: self.sql.clone(),
            hive_conf: self.hive_conf.clone(),
            hive_version: Some(self.hive_version.clone()),
            echo: Some(self.echo),
        }
    }

    /// Checks the config is complete enough to start a run.
    pub fn validate(&self) -> Result<(), SqlScriptError> {
        if self.sql.is_none() {
            return Err(SqlScriptError::Configuration(
                "no SQL script given (use --sql or set `sql` in the config file)".to_string(),
            ));
        }

        if self.hive_conf.is_some() && self.hive_version.trim().is_empty() {
            return Err(SqlScriptError::Configuration(
                "hive_version must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// The file is not validated here: command-line flags are usually layered
    /// on top before [`LauncherConfig::validate`] runs.
    ///
    /// # Errors
    ///
    /// Returns `SqlScriptError::Configuration` if parsing fails and
    /// `SqlScriptError::Io` if the file exists but cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self, SqlScriptError> {
        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                SqlScriptError::Configuration(format!(
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("config file '{}' not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(SqlScriptError::Io(e)),
        }
    }

    /// Loads from `optional_path` when given, otherwise returns the defaults.
    pub fn load_or_default(optional_path: Option<&Path>) -> Result<Self, SqlScriptError> {
        match optional_path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Path of the script to run.
    pub fn script_path(&self) -> Result<&Path, SqlScriptError> {
        self.sql.as_deref().ok_or_else(|| {
            SqlScriptError::Configuration("no SQL script configured".to_string())
        })
    }

    /// The startup catalog to register, if a hive configuration was supplied.
    pub fn hive_catalog(&self) -> Option<CatalogConfig> {
        self.hive_conf
            .as_ref()
            .map(|dir| CatalogConfig::new(dir.clone(), self.hive_version.clone()))
    }
}
