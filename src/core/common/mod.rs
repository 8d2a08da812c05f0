pub mod error;
pub use error::SqlScriptError;
