//! Domain entities: core data structures

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::DomainError;

/// Fetched variables, iterated in ascending byte order of their names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    vars: BTreeMap<String, String>,
}

impl VariableSet {
    /// Deserialize a fetch payload (a JSON object of strings).
    ///
    /// A blank payload means the fetch collaborator did not recognize the
    /// credential; anything that is not a string-to-string object is
    /// malformed. `{}` is valid and yields an empty set.
    pub fn from_payload(payload: &str) -> Result<Self, DomainError> {
        if payload.trim().is_empty() {
            return Err(DomainError::InvalidCredential);
        }
        let vars: HashMap<String, String> = serde_json::from_str(payload)
            .map_err(|source| DomainError::MalformedPayload { source })?;
        Ok(vars.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Variables in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply override precedence against the calling environment.
    ///
    /// Unless `force` is set, a name that `lookup` reports with a non-empty
    /// value keeps that value instead of the fetched one.
    pub fn resolve_overrides<F>(self, force: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if force {
            return self;
        }
        let vars = self
            .vars
            .into_iter()
            .map(|(key, fetched)| match lookup(&key) {
                Some(existing) if !existing.is_empty() => (key, existing),
                _ => (key, fetched),
            })
            .collect();
        Self { vars }
    }
}

impl FromIterator<(String, String)> for VariableSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

/// Shell text layout selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputDialect {
    /// `export 'k'='v' 'k2'='v2'` on one line
    #[default]
    PosixExport,
    /// `export k='v'` per line, no quote escaping
    PamCompatible,
    /// `'k'='v'` per line with a trailing newline
    DotEnv,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fetched values beat values already set in the environment
    pub force: bool,
    pub dialect: OutputDialect,
}

/// Parameters forwarded verbatim to the fetch collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub should_cache: bool,
    pub cache_dir: Option<PathBuf>,
    pub client_name: String,
    pub client_version: String,
    pub verbose: bool,
    pub timeout_seconds: f64,
    pub retries: u8,
    pub retry_backoff: f64,
}

/// Failure reported by the fetch collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raw payload on success, structured failure otherwise.
pub type FetchOutcome = Result<String, FetchFailure>;

/// Decide whether the fetch collaborator may use its local cache.
///
/// `--no-cache` beats `--cache`, which beats auto-detection via a local
/// `.env` file.
pub fn should_cache(cache: bool, no_cache: bool, local_env_file: bool) -> bool {
    if no_cache {
        false
    } else {
        cache || local_env_file
    }
}
