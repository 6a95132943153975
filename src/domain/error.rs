//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Reasons a credential cannot be turned into shell exports.
///
/// None of these abort the process: each one is rendered as a
/// single-quoted `echo` line followed by `; false`.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("ENVKEY missing.")]
    MissingCredential,

    #[error("{0}")]
    AdapterFailure(String),

    #[error("ENVKEY invalid.")]
    InvalidCredential,

    #[error("There was a problem parsing EnvKey's response.")]
    MalformedPayload {
        #[source]
        source: serde_json::Error,
    },
}
