//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (Fetcher, EnvReader, FileSystem)
//! but are themselves concrete structs, not traits.

mod credential;
mod source;

pub use credential::CredentialResolver;
pub use source::{ShellOutput, SourceService};
