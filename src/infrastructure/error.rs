//! Process-boundary errors for envkey-source
//!
//! Fetch failures are not here: the fetch adapter returns them as a
//! `FetchOutcome` so they render as shell text. What remains are failures
//! that stop the CLI before anything is sourced.

use thiserror::Error;

use crate::application::ApplicationError;

/// Errors raised while preparing a source run.
#[derive(Error, Debug)]
pub enum InfraError {
    /// Settings or `.env` problems reported by the application layer.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// The process could not inspect its own surroundings (e.g. the cwd).
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
