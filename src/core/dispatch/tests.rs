use super::*;
use crate::core::script::split_statements;
use crate::core::session::{CatalogConfig, LocalSession};
use std::collections::HashSet;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    SetDialect(Dialect),
    UseCatalog(String),
    Execute { text: String, dialect: Dialect, catalog: String },
}

/// Records every call; fails to parse statements listed in `unparsable`.
struct RecordingSession {
    dialect: Dialect,
    catalog: String,
    catalogs: HashSet<String>,
    unparsable: HashSet<String>,
    calls: Vec<Call>,
}

impl RecordingSession {
    fn new() -> Self {
        Self {
            dialect: Dialect::Default,
            catalog: "default_catalog".to_string(),
            catalogs: ["default_catalog", "mycat"].iter().map(|c| c.to_string()).collect(),
            unparsable: HashSet::new(),
            calls: Vec::new(),
        }
    }

    fn failing_on(mut self, statement: &str) -> Self {
        self.unparsable.insert(statement.to_string());
        self
    }

    fn executed(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Execute { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl SessionController for RecordingSession {
    fn set_dialect(&mut self, dialect: Dialect) -> Result<(), SqlScriptError> {
        self.dialect = dialect;
        self.calls.push(Call::SetDialect(dialect));
        Ok(())
    }

    fn use_catalog(&mut self, name: &str) -> Result<(), SqlScriptError> {
        if !self.catalogs.contains(name) {
            return Err(SqlScriptError::CatalogNotFound(name.to_string()));
        }
        self.catalog = name.to_string();
        self.calls.push(Call::UseCatalog(name.to_string()));
        Ok(())
    }

    fn execute_statement(&mut self, statement: &str) -> Result<(), SqlScriptError> {
        if self.unparsable.contains(statement) {
            return Err(SqlScriptError::parse(statement, "Encountered unexpected token"));
        }
        self.calls.push(Call::Execute {
            text: statement.to_string(),
            dialect: self.dialect,
            catalog: self.catalog.clone(),
        });
        Ok(())
    }

    fn register_catalog(&mut self, name: &str, _config: CatalogConfig) -> Result<(), SqlScriptError> {
        self.catalogs.insert(name.to_string());
        Ok(())
    }
}

fn run_with(
    session: RecordingSession,
    script: &str,
) -> (Result<RunSummary, SqlScriptError>, RecordingSession, String) {
    let mut echo = Vec::new();
    let mut runner = ScriptRunner::new(session, Some(&mut echo));
    let result = runner.run(&split_statements(script));
    let session = runner.into_session();
    (result, session, String::from_utf8(echo).unwrap())
}

#[test]
fn test_directives_never_reach_the_engine() {
    let (result, session, _) = run_with(
        RecordingSession::new(),
        "USE DIALECT hive; USE CATALOG mycat; SELECT 1;",
    );
    let summary = result.unwrap();

    assert_eq!(
        session.calls,
        vec![
            Call::SetDialect(Dialect::Hive),
            Call::UseCatalog("mycat".to_string()),
            Call::Execute {
                text: "SELECT 1".to_string(),
                dialect: Dialect::Hive,
                catalog: "mycat".to_string(),
            },
        ]
    );
    assert_eq!(summary.statements, 3);
    assert_eq!(summary.directives(), 2);
    assert_eq!(summary.executed, 1);
    assert!(summary.finished_at >= summary.started_at);
}

#[test]
fn test_catalog_carries_forward() {
    let (result, session, _) = run_with(
        RecordingSession::new(),
        "use catalog mycat;\nCREATE TABLE t (a INT);\nINSERT INTO t VALUES (1);",
    );
    result.unwrap();

    let catalogs: Vec<&str> = session
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Execute { catalog, .. } => Some(catalog.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(catalogs, vec!["mycat", "mycat"]);
}

#[test]
fn test_unsupported_dialect_halts_immediately() {
    let (result, session, echo) = run_with(
        RecordingSession::new(),
        "SELECT 1; USE DIALECT foo; SELECT 2;",
    );

    match result {
        Err(SqlScriptError::UnsupportedDialect(name)) => assert_eq!(name, "foo"),
        other => panic!("Expected UnsupportedDialect, got {:?}", other),
    }
    assert_eq!(session.executed(), vec!["SELECT 1"]);
    assert_eq!(echo, "SELECT 1\nUSE DIALECT foo\n");
}

#[test]
fn test_padded_dialect_name_is_unsupported() {
    let (result, session, _) =
        run_with(RecordingSession::new(), "USE DIALECT  hive; SELECT 1");

    match result {
        Err(SqlScriptError::UnsupportedDialect(name)) => assert_eq!(name, " hive"),
        other => panic!("Expected UnsupportedDialect, got {:?}", other),
    }
    assert!(session.executed().is_empty());
}

#[test]
fn test_parse_failure_halts_and_names_statement() {
    let script = "CREATE TABLE t (a INT); garbled sql; CREATE TABLE u (b INT)";
    let (result, session, echo) =
        run_with(RecordingSession::new().failing_on("garbled sql"), script);

    let err = result.unwrap_err();
    match &err {
        SqlScriptError::StatementFailed { position, statement, source } => {
            assert_eq!(*position, 2);
            assert_eq!(statement, "garbled sql");
            assert!(source.is_parse_error());
        }
        other => panic!("Expected StatementFailed, got {:?}", other),
    }
    assert!(err.to_string().contains("garbled sql"));
    assert!(err.to_string().contains("Encountered unexpected token"));

    assert_eq!(session.executed(), vec!["CREATE TABLE t (a INT)"]);
    assert!(!echo.contains("CREATE TABLE u"));
}

#[test]
fn test_unknown_catalog_propagates_unwrapped() {
    let (result, session, _) =
        run_with(RecordingSession::new(), "USE CATALOG missing; SELECT 1");

    assert!(matches!(result, Err(SqlScriptError::CatalogNotFound(ref n)) if n == "missing"));
    assert!(session.executed().is_empty());
}

#[test]
fn test_use_dialect_default_twice_is_idempotent() {
    let (result, session, _) = run_with(
        RecordingSession::new(),
        "USE DIALECT default; USE DIALECT DEFAULT;",
    );
    result.unwrap();

    assert_eq!(
        session.calls,
        vec![Call::SetDialect(Dialect::Default), Call::SetDialect(Dialect::Default)]
    );
    assert_eq!(session.dialect, Dialect::Default);
}

#[test]
fn test_echo_matches_statement_order() {
    let (result, _, echo) = run_with(
        RecordingSession::new(),
        "  SELECT 1 ;\n\nUSE CATALOG mycat;\n SELECT 2",
    );
    result.unwrap();
    assert_eq!(echo, "SELECT 1\nUSE CATALOG mycat\nSELECT 2\n");
}

#[test]
fn test_without_echo_sink() {
    let mut runner: ScriptRunner<_, Vec<u8>> = ScriptRunner::new(RecordingSession::new(), None);
    let summary = runner.run(&split_statements("SELECT 1; SELECT 2")).unwrap();
    assert_eq!(summary.executed, 2);
}

#[test]
fn test_empty_script_runs_nothing() {
    let (result, session, echo) = run_with(RecordingSession::new(), " ; ;\n");
    let summary = result.unwrap();
    assert_eq!(summary.statements, 0);
    assert!(session.calls.is_empty());
    assert!(echo.is_empty());
}

#[test]
fn test_run_script_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "USE DIALECT hive;\nSELECT * FROM src;\n").unwrap();

    let mut runner: ScriptRunner<_, Vec<u8>> = ScriptRunner::new(RecordingSession::new(), None);
    let summary = runner.run_script(file.path()).unwrap();
    assert_eq!(summary.statements, 2);
    assert_eq!(runner.session().executed(), vec!["SELECT * FROM src"]);
}

#[test]
fn test_run_script_missing_file_runs_nothing() {
    let mut runner: ScriptRunner<_, Vec<u8>> = ScriptRunner::new(RecordingSession::new(), None);
    let result = runner.run_script(Path::new("/no/such/script.sql"));
    assert!(matches!(result, Err(SqlScriptError::Io(_))));
    assert!(runner.session().calls.is_empty());
}

#[test]
fn test_local_session_end_to_end() {
    let script = "
        CREATE CATALOG mycat WITH ('type' = 'generic_in_memory');
        USE CATALOG mycat;
        USE DIALECT hive;
        CREATE TABLE t (a INT);
        MSCK REPAIR TABLE t;
        USE DIALECT default;
        SELECT a FROM t;
    ";
    let mut session = LocalSession::new();
    let summary = {
        let mut runner: ScriptRunner<_, Vec<u8>> = ScriptRunner::new(&mut session, None);
        runner.run(&split_statements(script)).unwrap()
    };
    assert_eq!(summary.executed, 4);
    assert_eq!(summary.directives(), 3);

    let history = session.history();
    assert_eq!(history[0].catalog, "default_catalog");
    assert_eq!(history[1].catalog, "mycat");
    assert_eq!(history[2].dialect, Dialect::Hive);
    assert_eq!(history[3].dialect, Dialect::Default);
}

#[test]
fn test_local_session_garbled_statement() {
    let script = "CREATE TABLE t (a INT); garbled sql; CREATE TABLE u (b INT)";
    let mut session = LocalSession::new();
    let err = {
        let mut runner: ScriptRunner<_, Vec<u8>> = ScriptRunner::new(&mut session, None);
        runner.run(&split_statements(script)).unwrap_err()
    };

    assert!(err.to_string().contains("garbled sql"));
    assert_eq!(session.history().len(), 1);
}
