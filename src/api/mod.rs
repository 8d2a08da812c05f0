//! Public API for launching SQL scripts.
//!
//! The main entry point is [`Launcher`], which registers startup catalogs on a
//! session and then runs the configured script through the dispatch loop.

pub mod launcher;

pub use launcher::Launcher;
