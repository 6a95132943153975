//! Application-level errors
//!
//! Domain errors never surface here: the source service renders them into
//! shell text. These cover configuration and local file access.

use thiserror::Error;

/// Application errors add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
