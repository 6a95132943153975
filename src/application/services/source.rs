//! Credential sourcing service
//!
//! Turns a credential into shell text: fetch, classify, resolve overrides,
//! render. Every failure ends up as an `echo ...; false` line.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::domain::shell::{self, NO_VARS_MESSAGE};
use crate::domain::{DomainError, FetchOptions, RenderOptions, VariableSet};
use crate::infrastructure::traits::{EnvReader, Fetcher};

/// Text for the calling shell to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutput {
    pub text: String,
    /// True when `text` ends in `; false`
    pub failed: bool,
}

impl ShellOutput {
    fn success(text: String) -> Self {
        Self {
            text,
            failed: false,
        }
    }

    /// Shell-safe error line for `message`.
    pub fn failure(message: &str) -> Self {
        Self {
            text: shell::error_line(message),
            failed: true,
        }
    }
}

/// Service producing shell exports for a credential.
pub struct SourceService {
    fetcher: Arc<dyn Fetcher>,
    env: Arc<dyn EnvReader>,
}

impl SourceService {
    pub fn new(fetcher: Arc<dyn Fetcher>, env: Arc<dyn EnvReader>) -> Self {
        Self { fetcher, env }
    }

    /// Fetch the variables behind `credential` and render them.
    ///
    /// Checks run in a fixed order: missing credential, fetch failure,
    /// blank payload, malformed payload, empty set. An empty credential
    /// never reaches the fetcher.
    #[instrument(
        level = "debug",
        skip_all,
        fields(force = render.force, dialect = ?render.dialect)
    )]
    pub fn source(
        &self,
        credential: &str,
        fetch: &FetchOptions,
        render: &RenderOptions,
    ) -> ShellOutput {
        match self.try_source(credential, fetch, render) {
            Ok(output) => output,
            Err(e) => {
                debug!("cannot source credential: {}", e);
                ShellOutput::failure(&e.to_string())
            }
        }
    }

    fn try_source(
        &self,
        credential: &str,
        fetch: &FetchOptions,
        render: &RenderOptions,
    ) -> Result<ShellOutput, DomainError> {
        if credential.is_empty() {
            return Err(DomainError::MissingCredential);
        }

        let payload = self
            .fetcher
            .fetch(credential, fetch)
            .map_err(|f| DomainError::AdapterFailure(f.message))?;

        let vars = VariableSet::from_payload(&payload)?;
        if vars.is_empty() {
            info!("fetched configuration is empty");
            return Ok(ShellOutput::success(shell::echo(NO_VARS_MESSAGE)));
        }
        debug!(count = vars.len(), "fetched variables");

        let resolved = vars.resolve_overrides(render.force, |key| self.env.var(key));
        Ok(ShellOutput::success(shell::render(&resolved, render.dialect)))
    }
}
