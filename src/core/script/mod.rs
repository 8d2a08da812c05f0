//! Script loading and statement splitting.

pub mod loader;
pub mod splitter;

pub use loader::{load_script, ScriptText};
pub use splitter::{split_statements, Statement};
