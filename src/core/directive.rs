//! Recognition of the session-control directives.
//!
//! Two statement shapes are intercepted before anything reaches the engine:
//!
//! ```text
//! USE DIALECT <name>
//! USE CATALOG <name>
//! ```
//!
//! Keywords match case-insensitively, are separated by exactly one space and
//! must span the whole statement. The name is everything after the second
//! space, kept as written, and may not cross a line. Everything else is
//! opaque SQL.

/// Classification of a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `USE DIALECT <name>`. The name is kept as written.
    DialectSwitch { name: String },
    /// `USE CATALOG <name>`. The name is passed through unvalidated.
    CatalogSwitch { name: String },
    Opaque { text: String },
}

impl Directive {
    /// Classifies a trimmed statement. Dialect switches are checked first.
    pub fn recognize(statement: &str) -> Self {
        if let Some(name) = match_use(statement, "DIALECT") {
            return Self::DialectSwitch { name: name.to_string() };
        }
        if let Some(name) = match_use(statement, "CATALOG") {
            return Self::CatalogSwitch { name: name.to_string() };
        }
        Self::Opaque { text: statement.to_string() }
    }
}

/// Matches `USE <target> <name>` and returns the name.
fn match_use<'a>(statement: &'a str, target: &str) -> Option<&'a str> {
    let rest = strip_keyword(statement.trim(), "USE")?;
    let name = strip_keyword(rest, target)?;
    if name.is_empty() || name.contains(is_line_terminator) {
        None
    } else {
        Some(name)
    }
}

/// Strips a leading keyword followed by a single space, returning what comes after.
fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let head = input.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    input[keyword.len()..].strip_prefix(' ')
}

const fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}
