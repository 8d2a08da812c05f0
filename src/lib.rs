#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]
#![forbid(unsafe_code)]

//! # sqlscript: run SQL scripts against an engine session
//!
//! `sqlscript` reads a file of `;`-separated SQL statements and feeds them, in
//! order, to a [`SessionController`](core::session::SessionController).
//! Two pseudo-statements never reach the engine:
//! - `USE DIALECT hive|default` switches the SQL dialect
//! - `USE CATALOG <name>` switches the active catalog
//!
//! Everything else is passed through verbatim. The first failure stops the run.
//!
//! Splitting is purely lexical: a `;` inside a string literal or a comment
//! ends the statement early.

pub mod api;
pub mod core;

pub use crate::api::Launcher;
pub use crate::core::common::SqlScriptError;
pub use crate::core::dispatch::{RunSummary, ScriptRunner};
pub use crate::core::session::{CatalogConfig, Dialect, LocalSession, SessionController};

/// Core result type for the library
pub type Result<T> = std::result::Result<T, SqlScriptError>;
