//! Credential discovery
//!
//! Order: explicit argument, `ENVKEY` in the process environment, `ENVKEY`
//! in the local `.env` file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{DotEnvFile, ENVKEY_VAR, LOCAL_ENV_FILE};
use crate::infrastructure::traits::{EnvReader, FileSystem};

/// Finds the credential to fetch when none is given explicitly.
pub struct CredentialResolver {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn EnvReader>,
}

impl CredentialResolver {
    pub fn new(fs: Arc<dyn FileSystem>, env: Arc<dyn EnvReader>) -> Self {
        Self { fs, env }
    }

    /// Path of the local developer file inside `dir`.
    pub fn local_env_file(&self, dir: &Path) -> PathBuf {
        dir.join(LOCAL_ENV_FILE)
    }

    /// Whether `dir` holds a local developer file.
    pub fn has_local_env_file(&self, dir: &Path) -> bool {
        self.fs.is_file(&self.local_env_file(dir))
    }

    /// Resolve the credential, returning an empty string if none is found.
    ///
    /// An explicit argument is used as-is, even when empty.
    pub fn resolve(&self, explicit: Option<&str>, dir: &Path) -> ApplicationResult<String> {
        if let Some(credential) = explicit {
            debug!("credential from argument");
            return Ok(credential.to_string());
        }

        if let Some(credential) = self.env.var(ENVKEY_VAR).filter(|v| !v.is_empty()) {
            debug!("credential from process environment");
            return Ok(credential);
        }

        let path = self.local_env_file(dir);
        if !self.fs.is_file(&path) {
            debug!("no credential source found");
            return Ok(String::new());
        }

        let content = self
            .fs
            .read_to_string(&path)
            .with_path_context("read local env file", &path)?;
        let credential = DotEnvFile::parse(&content)
            .get(ENVKEY_VAR)
            .unwrap_or_default()
            .to_string();
        debug!(found = !credential.is_empty(), "credential from {}", path.display());
        Ok(credential)
    }
}
