use crate::core::common::SqlScriptError;
use crate::core::config::{LauncherConfig, HIVE_CATALOG_NAME};
use crate::core::dispatch::{RunSummary, ScriptRunner};
use crate::core::session::{LocalSession, SessionController};
use std::io::Write;

/// `Launcher` wires a [`LauncherConfig`] to a session and runs the configured script.
///
/// Startup catalogs are registered once, before the first statement, and the
/// script then goes through the dispatch loop.
#[derive(Debug)]
pub struct Launcher<S> {
    config: LauncherConfig,
    session: S,
    catalogs_registered: bool,
}

impl Launcher<LocalSession> {
    /// Launcher backed by the bundled in-memory session.
    pub fn local(config: LauncherConfig) -> Self {
        Self::new(config, LocalSession::new())
    }
}

impl<S: SessionController> Launcher<S> {
    pub fn new(config: LauncherConfig, session: S) -> Self {
        Self { config, session, catalogs_registered: false }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Registers the hive catalog if one is configured. Later calls do nothing.
    ///
    /// # Errors
    /// Returns whatever the session reports for an unusable catalog configuration.
    pub fn register_catalogs<W: Write>(&mut self, out: &mut W) -> Result<(), SqlScriptError> {
        if self.catalogs_registered {
            return Ok(());
        }
        if let Some(catalog) = self.config.hive_catalog() {
            writeln!(out, "Registering hive catalog: version {}", catalog.version)?;
            self.session.register_catalog(HIVE_CATALOG_NAME, catalog)?;
        }
        self.catalogs_registered = true;
        Ok(())
    }

    /// Registers startup catalogs and runs the configured script.
    ///
    /// Statements are echoed to `out` unless echo is disabled in the config.
    ///
    /// # Errors
    /// Returns the first failure; statements after it never run.
    pub fn run<W: Write>(&mut self, mut out: W) -> Result<RunSummary, SqlScriptError> {
        self.config.validate()?;
        self.register_catalogs(&mut out)?;

        let path = self.config.script_path()?.to_path_buf();
        let echo = if self.config.echo { Some(&mut out) } else { None };
        let mut runner = ScriptRunner::new(&mut self.session, echo);
        runner.run_script(&path)
    }
}
