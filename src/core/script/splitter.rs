//! Naive statement splitting.
//!
//! The script is cut on every `;` character. Quotes and comments are not
//! understood, so a `;` inside a string literal or a comment ends the
//! statement early. Scripts relying on that will break; keep semicolons out of
//! literals and comments.

/// One statement of a script, with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    position: usize,
    text: String,
}

impl Statement {
    pub fn new(position: usize, text: impl Into<String>) -> Self {
        Self { position, text: text.into() }
    }

    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Splits `script` on `;`, trims every piece and drops the empty ones.
pub fn split_statements(script: &str) -> Vec<Statement> {
    script
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .map(|(idx, piece)| Statement::new(idx + 1, piece))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(script: &str) -> Vec<String> {
        split_statements(script).into_iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_drops_empty_pieces_and_trims() {
        assert_eq!(texts("S1; S2; ;  S3 ;"), vec!["S1", "S2", "S3"]);
    }

    #[test]
    fn test_positions_are_one_based_and_ordered() {
        let statements = split_statements(";;\n USE CATALOG c;\nSELECT 1;\n");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], Statement::new(1, "USE CATALOG c"));
        assert_eq!(statements[1], Statement::new(2, "SELECT 1"));
    }

    #[test]
    fn test_empty_and_blank_scripts() {
        assert!(split_statements("").is_empty());
        assert!(split_statements("  \n\t ; ;\n").is_empty());
    }

    #[test]
    fn test_statement_without_trailing_delimiter() {
        assert_eq!(texts("SELECT 1; SELECT 2"), vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_multiline_statement_keeps_inner_whitespace() {
        assert_eq!(
            texts("CREATE TABLE t (\n  a INT,\n  b STRING\n);"),
            vec!["CREATE TABLE t (\n  a INT,\n  b STRING\n)"]
        );
    }

    #[test]
    fn test_semicolon_inside_literal_splits_early() {
        assert_eq!(
            texts("SELECT 'a;b' FROM t;"),
            vec!["SELECT 'a", "b' FROM t"]
        );
    }

    #[test]
    fn test_rejoining_preserves_boundaries() {
        let script = "CREATE TABLE a (x INT);\nINSERT INTO a VALUES (1);\nSELECT x FROM a";
        let joined = texts(script).join(";");
        assert_eq!(texts(&joined), texts(script));
        assert_eq!(joined.matches(';').count(), 2);
    }
}
