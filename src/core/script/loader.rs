use crate::core::common::SqlScriptError;
use crate::core::script::splitter::{split_statements, Statement};
use std::fs;
use std::io;
use std::path::Path;

/// Full text of a loaded script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptText(String);

impl ScriptText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the text and splits it into statements.
    pub fn into_statements(self) -> Vec<Statement> {
        split_statements(&self.0)
    }
}

/// Reads the script at `path`.
///
/// # Errors
///
/// Returns `SqlScriptError::Io` if the file is missing, unreadable, or not UTF-8.
pub fn load_script(path: &Path) -> Result<ScriptText, SqlScriptError> {
    let text = fs::read_to_string(path).map_err(|e| {
        SqlScriptError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read sql file '{}': {}", path.display(), e),
        ))
    })?;
    log::debug!("loaded {} bytes from {}", text.len(), path.display());
    Ok(ScriptText(text))
}
