pub mod common;
pub mod config;
pub mod directive;
pub mod dispatch;
pub mod script;
pub mod session;
pub use self::config::LauncherConfig;
