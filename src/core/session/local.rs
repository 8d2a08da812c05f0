// src/core/session/local.rs
//! In-memory session used when no external engine is attached.
//!
//! It keeps the session state an engine would keep (dialect, active catalog,
//! registered catalogs), checks statements lexically and records every
//! accepted statement together with the state it ran under. Nothing is
//! planned or executed against data.

use super::lexer::{Lexer, Token};
use super::{CatalogConfig, Dialect, SessionController};
use crate::core::common::SqlScriptError;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Catalog every session starts with.
pub const DEFAULT_CATALOG: &str = "default_catalog";

/// Statement verbs accepted in every dialect.
const COMMON_VERBS: &[&str] = &[
    "SELECT", "WITH", "VALUES", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER",
    "SHOW", "DESCRIBE", "DESC", "EXPLAIN", "USE", "SET", "RESET", "EXECUTE", "BEGIN", "END",
    "ADD", "REMOVE",
];

/// Extra verbs only the hive dialect accepts.
const HIVE_VERBS: &[&str] = &["MSCK", "ANALYZE", "LOAD", "TRUNCATE", "EXPORT", "IMPORT"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogKind {
    /// Built in, or created by a `CREATE CATALOG` statement.
    InMemory,
    /// Registered at startup from a metastore configuration.
    Hive { conf_dir: PathBuf, version: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogHandle {
    pub name: String,
    pub kind: CatalogKind,
}

/// A statement the session accepted, with the state in effect when it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub dialect: Dialect,
    pub catalog: String,
    pub text: String,
}

#[derive(Debug)]
pub struct LocalSession {
    dialect: Dialect,
    current_catalog: String,
    catalogs: BTreeMap<String, CatalogHandle>,
    history: Vec<ExecutedStatement>,
}

impl Default for LocalSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog DDL the session applies to its own state.
enum CatalogDdl {
    Create { name: String, if_not_exists: bool },
    Drop { name: String, if_exists: bool },
}

impl LocalSession {
    pub fn new() -> Self {
        let mut catalogs = BTreeMap::new();
        catalogs.insert(
            DEFAULT_CATALOG.to_string(),
            CatalogHandle { name: DEFAULT_CATALOG.to_string(), kind: CatalogKind::InMemory },
        );
        Self {
            dialect: Dialect::Default,
            current_catalog: DEFAULT_CATALOG.to_string(),
            catalogs,
            history: Vec::new(),
        }
    }

    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn current_catalog(&self) -> &str {
        &self.current_catalog
    }

    pub fn catalog(&self, name: &str) -> Option<&CatalogHandle> {
        self.catalogs.get(name)
    }

    /// Registered catalog names in sorted order.
    pub fn catalog_names(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// Statements accepted so far, in submission order.
    pub fn history(&self) -> &[ExecutedStatement] {
        &self.history
    }

    fn verb_allowed(&self, verb: &str) -> bool {
        let upper = verb.to_ascii_uppercase();
        COMMON_VERBS.contains(&upper.as_str())
            || (self.dialect == Dialect::Hive && HIVE_VERBS.contains(&upper.as_str()))
    }

    fn apply_catalog_ddl(&mut self, ddl: CatalogDdl) -> Result<(), SqlScriptError> {
        match ddl {
            CatalogDdl::Create { name, if_not_exists } => {
                if self.catalogs.contains_key(&name) {
                    if if_not_exists {
                        return Ok(());
                    }
                    return Err(SqlScriptError::CatalogAlreadyExists { name });
                }
                log::info!("created catalog {}", name);
                self.catalogs
                    .insert(name.clone(), CatalogHandle { name, kind: CatalogKind::InMemory });
            }
            CatalogDdl::Drop { name, if_exists } => {
                if !self.catalogs.contains_key(&name) {
                    if if_exists {
                        return Ok(());
                    }
                    return Err(SqlScriptError::CatalogNotFound(name));
                }
                if name == self.current_catalog {
                    return Err(SqlScriptError::Execution(format!(
                        "cannot drop the active catalog {}",
                        name
                    )));
                }
                log::info!("dropped catalog {}", name);
                self.catalogs.remove(&name);
            }
        }
        Ok(())
    }
}

/// Recognizes `CREATE CATALOG [IF NOT EXISTS] name` and `DROP CATALOG [IF EXISTS] name`.
fn parse_catalog_ddl(tokens: &[Token]) -> Result<Option<CatalogDdl>, String> {
    let create = match tokens {
        [verb, object, ..] if object.is_word("CATALOG") && verb.is_word("CREATE") => true,
        [verb, object, ..] if object.is_word("CATALOG") && verb.is_word("DROP") => false,
        _ => return Ok(None),
    };

    let mut rest = &tokens[2..];
    let guard: &[&str] = if create { &["IF", "NOT", "EXISTS"] } else { &["IF", "EXISTS"] };
    let guarded =
        rest.len() >= guard.len() && rest.iter().zip(guard).all(|(token, kw)| token.is_word(kw));
    if guarded {
        rest = &rest[guard.len()..];
    }

    let name = rest
        .first()
        .and_then(Token::identifier)
        .ok_or_else(|| "expected a catalog name".to_string())?
        .to_string();

    Ok(Some(if create {
        CatalogDdl::Create { name, if_not_exists: guarded }
    } else {
        CatalogDdl::Drop { name, if_exists: guarded }
    }))
}

impl SessionController for LocalSession {
    fn set_dialect(&mut self, dialect: Dialect) -> Result<(), SqlScriptError> {
        log::debug!("dialect {} -> {}", self.dialect, dialect);
        self.dialect = dialect;
        Ok(())
    }

    fn use_catalog(&mut self, name: &str) -> Result<(), SqlScriptError> {
        if !self.catalogs.contains_key(name) {
            return Err(SqlScriptError::CatalogNotFound(name.to_string()));
        }
        log::debug!("catalog {} -> {}", self.current_catalog, name);
        self.current_catalog = name.to_string();
        Ok(())
    }

    fn execute_statement(&mut self, statement: &str) -> Result<(), SqlScriptError> {
        let tokens = Lexer::new(statement)
            .tokenize()
            .map_err(|e| SqlScriptError::parse(statement, e.to_string()))?;

        let verb = match tokens.iter().find(|t| **t != Token::LParen) {
            Some(Token::Word(word)) => word,
            Some(Token::EOF) | None => {
                return Err(SqlScriptError::parse(statement, "empty statement"));
            }
            Some(other) => {
                return Err(SqlScriptError::parse(
                    statement,
                    format!("expected a statement keyword, found {:?}", other),
                ));
            }
        };

        if !self.verb_allowed(verb) {
            return Err(SqlScriptError::parse(
                statement,
                format!("unknown statement '{}' for the {} dialect", verb, self.dialect),
            ));
        }

        if let Some(ddl) =
            parse_catalog_ddl(&tokens).map_err(|reason| SqlScriptError::parse(statement, reason))?
        {
            self.apply_catalog_ddl(ddl)?;
        }

        self.history.push(ExecutedStatement {
            dialect: self.dialect,
            catalog: self.current_catalog.clone(),
            text: statement.to_string(),
        });
        Ok(())
    }

    fn register_catalog(&mut self, name: &str, config: CatalogConfig) -> Result<(), SqlScriptError> {
        if self.catalogs.contains_key(name) {
            return Err(SqlScriptError::CatalogAlreadyExists { name: name.to_string() });
        }
        if config.version.trim().is_empty() {
            return Err(SqlScriptError::Configuration(format!(
                "catalog {} needs a version",
                name
            )));
        }
        match fs::metadata(&config.conf_dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(SqlScriptError::Configuration(format!(
                    "hive conf path '{}' is not a directory",
                    config.conf_dir.display()
                )));
            }
            Err(e) => {
                return Err(SqlScriptError::Configuration(format!(
                    "hive conf dir '{}' is not accessible: {}",
                    config.conf_dir.display(),
                    e
                )));
            }
        }

        log::info!("registered catalog {} (hive {})", name, config.version);
        self.catalogs.insert(
            name.to_string(),
            CatalogHandle {
                name: name.to_string(),
                kind: CatalogKind::Hive { conf_dir: config.conf_dir, version: config.version },
            },
        );
        Ok(())
    }
}
