// src/core/session/mod.rs
//! The session interface the dispatch loop drives, plus the bundled in-memory
//! implementation.

pub mod lexer;
pub mod local;

use crate::core::common::SqlScriptError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub use local::LocalSession;

/// SQL syntax variant the engine parses statements with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Dialect {
    #[default]
    Default,
    Hive,
}

impl Dialect {
    /// Resolves a directive name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `SqlScriptError::UnsupportedDialect` for anything but `hive` or `default`.
    pub fn from_name(name: &str) -> Result<Self, SqlScriptError> {
        if name.eq_ignore_ascii_case("hive") {
            Ok(Self::Hive)
        } else if name.eq_ignore_ascii_case("default") {
            Ok(Self::Default)
        } else {
            Err(SqlScriptError::UnsupportedDialect(name.to_string()))
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Hive => write!(f, "hive"),
        }
    }
}

/// Settings for a catalog registered at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding the metastore configuration.
    pub conf_dir: PathBuf,
    /// Engine compatibility version string.
    pub version: String,
}

impl CatalogConfig {
    pub fn new(conf_dir: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self { conf_dir: conf_dir.into(), version: version.into() }
    }
}

/// Operations the dispatch loop needs from a SQL engine session.
///
/// Implementations own all session state. Every call blocks until the engine
/// is done with it.
pub trait SessionController {
    /// Switches the dialect used for subsequent statements. Idempotent.
    fn set_dialect(&mut self, dialect: Dialect) -> Result<(), SqlScriptError>;

    /// Makes `name` the active catalog.
    ///
    /// # Errors
    ///
    /// `SqlScriptError::CatalogNotFound` if no catalog of that name is registered.
    fn use_catalog(&mut self, name: &str) -> Result<(), SqlScriptError>;

    /// Submits an opaque statement under the current dialect and catalog.
    ///
    /// # Errors
    ///
    /// `SqlScriptError::StatementParse` if the engine cannot parse `statement`.
    fn execute_statement(&mut self, statement: &str) -> Result<(), SqlScriptError>;

    /// Registers a named catalog. Called before the first statement runs.
    fn register_catalog(&mut self, name: &str, config: CatalogConfig) -> Result<(), SqlScriptError>;
}

impl<S: SessionController + ?Sized> SessionController for &mut S {
    fn set_dialect(&mut self, dialect: Dialect) -> Result<(), SqlScriptError> {
        (**self).set_dialect(dialect)
    }

    fn use_catalog(&mut self, name: &str) -> Result<(), SqlScriptError> {
        (**self).use_catalog(name)
    }

    fn execute_statement(&mut self, statement: &str) -> Result<(), SqlScriptError> {
        (**self).execute_statement(statement)
    }

    fn register_catalog(&mut self, name: &str, config: CatalogConfig) -> Result<(), SqlScriptError> {
        (**self).register_catalog(name, config)
    }
}
