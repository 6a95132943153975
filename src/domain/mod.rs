//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod dotenv;
pub mod entities;
pub mod error;
pub mod shell;

pub use dotenv::{DotEnvFile, ENVKEY_VAR, LOCAL_ENV_FILE};
pub use entities::*;
pub use error::DomainError;

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Falls back to the input unchanged when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
