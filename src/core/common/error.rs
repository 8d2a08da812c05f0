use std::fmt;

/// Every failure the launcher can surface. None of them is recovered locally:
/// the first one halts the run.
#[derive(Debug)]
pub enum SqlScriptError {
    Io(std::io::Error),
    UnsupportedDialect(String),
    CatalogNotFound(String),
    CatalogAlreadyExists { name: String },
    /// The engine could not parse an opaque statement.
    StatementParse { statement: String, reason: String },
    /// A statement failure re-raised by the dispatch loop with its position in the script.
    StatementFailed { position: usize, statement: String, source: Box<SqlScriptError> },
    /// The engine understood a statement but refused to run it.
    Execution(String),
    Configuration(String),
}

impl fmt::Display for SqlScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO Error: {}", e),
            Self::UnsupportedDialect(name) => write!(f, "Unsupported Dialect {}", name),
            Self::CatalogNotFound(name) => write!(f, "Catalog not found: {}", name),
            Self::CatalogAlreadyExists { name } => write!(f, "Catalog already exists: {}", name),
            Self::StatementParse { statement, reason } => {
                write!(f, "SQL Parsing Error: {} in statement '{}'", reason, statement)
            }
            Self::StatementFailed { position, statement, source } => {
                write!(
                    f,
                    "Failed to parse statement:\n{}\n(statement #{}): {}",
                    statement, position, source
                )
            }
            Self::Execution(s) => write!(f, "Execution Error: {}", s),
            Self::Configuration(s) => write!(f, "Configuration error: {}", s),
        }
    }
}

impl std::error::Error for SqlScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::StatementFailed { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SqlScriptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl SqlScriptError {
    /// Builds a parse failure for `statement`.
    #[must_use]
    pub fn parse(statement: &str, reason: impl Into<String>) -> Self {
        Self::StatementParse { statement: statement.to_string(), reason: reason.into() }
    }

    /// True for failures the engine raised because it could not parse a statement.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::StatementParse { .. })
    }
}
