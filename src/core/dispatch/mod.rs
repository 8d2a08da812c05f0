// src/core/dispatch/mod.rs
//! The statement dispatch loop.
//!
//! Statements run strictly in script order. Directives reconfigure the session
//! and never reach the engine; everything else is submitted verbatim. The
//! first failure ends the run.

use crate::core::common::SqlScriptError;
use crate::core::directive::Directive;
use crate::core::script::{load_script, Statement};
use crate::core::session::{Dialect, SessionController};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// What happened to a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    DialectSet(Dialect),
    CatalogUsed(String),
    Executed,
}

/// Counters for a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub statements: usize,
    pub dialect_switches: usize,
    pub catalog_switches: usize,
    pub executed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            statements: 0,
            dialect_switches: 0,
            catalog_switches: 0,
            executed: 0,
            started_at: now,
            finished_at: now,
        }
    }

    fn record(&mut self, outcome: &Outcome) {
        self.statements += 1;
        match outcome {
            Outcome::DialectSet(_) => self.dialect_switches += 1,
            Outcome::CatalogUsed(_) => self.catalog_switches += 1,
            Outcome::Executed => self.executed += 1,
        }
    }

    /// Directives applied during the run.
    pub const fn directives(&self) -> usize {
        self.dialect_switches + self.catalog_switches
    }
}

/// Drives a [`SessionController`] through a sequence of statements.
///
/// When an echo sink is given, each statement is written to it before it is
/// dispatched, so the last echoed statement is the one that failed.
pub struct ScriptRunner<S, W> {
    session: S,
    echo: Option<W>,
}

impl<S: SessionController, W: Write> ScriptRunner<S, W> {
    pub fn new(session: S, echo: Option<W>) -> Self {
        Self { session, echo }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Loads `path`, splits it and runs every statement.
    ///
    /// # Errors
    ///
    /// Fails before running anything if the script cannot be read; otherwise
    /// see [`ScriptRunner::run`].
    pub fn run_script(&mut self, path: &Path) -> Result<RunSummary, SqlScriptError> {
        let statements = load_script(path)?.into_statements();
        log::info!("running {} statements from {}", statements.len(), path.display());
        self.run(&statements)
    }

    /// Runs `statements` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// - `UnsupportedDialect` for a `USE DIALECT` naming anything but hive/default
    /// - `CatalogNotFound` when the session rejects a `USE CATALOG`
    /// - `StatementFailed` wrapping the engine's parse error, with the statement text
    /// - any other session error, unchanged
    pub fn run(&mut self, statements: &[Statement]) -> Result<RunSummary, SqlScriptError> {
        let mut summary = RunSummary::start();
        for statement in statements {
            let outcome = self.dispatch(statement)?;
            summary.record(&outcome);
        }
        summary.finished_at = Utc::now();
        log::info!(
            "run finished: {} statements, {} executed, {} directives",
            summary.statements,
            summary.executed,
            summary.directives()
        );
        Ok(summary)
    }

    /// Echoes, classifies and routes one statement.
    pub fn dispatch(&mut self, statement: &Statement) -> Result<Outcome, SqlScriptError> {
        if let Some(out) = self.echo.as_mut() {
            writeln!(out, "{}", statement.text())?;
        }
        log::debug!("statement #{}: {}", statement.position(), statement.text());

        match Directive::recognize(statement.text()) {
            Directive::DialectSwitch { name } => {
                let dialect = Dialect::from_name(&name)?;
                self.session.set_dialect(dialect)?;
                Ok(Outcome::DialectSet(dialect))
            }
            Directive::CatalogSwitch { name } => {
                self.session.use_catalog(&name)?;
                Ok(Outcome::CatalogUsed(name))
            }
            Directive::Opaque { text } => match self.session.execute_statement(&text) {
                Ok(()) => Ok(Outcome::Executed),
                Err(e) if e.is_parse_error() => {
                    log::error!("statement #{} failed to parse", statement.position());
                    Err(SqlScriptError::StatementFailed {
                        position: statement.position(),
                        statement: text,
                        source: Box::new(e),
                    })
                }
                Err(e) => Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests;
