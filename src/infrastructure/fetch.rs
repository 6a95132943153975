//! Fetch adapter backed by the `envkey-fetch` executable

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{FetchFailure, FetchOptions, FetchOutcome};
use crate::infrastructure::traits::{CommandRunner, Fetcher};

const ERROR_PREFIX: &str = "error: ";

/// Runs an external fetch executable and classifies its result.
pub struct FetchCommand {
    program: String,
    runner: Arc<dyn CommandRunner>,
}

impl FetchCommand {
    pub fn new(program: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

/// Command line for the fetch executable. The credential comes first.
pub fn fetch_args(credential: &str, options: &FetchOptions) -> Vec<String> {
    let mut args = vec![credential.to_string()];
    if options.should_cache {
        args.push("--cache".into());
    }
    if let Some(dir) = &options.cache_dir {
        args.push("--cache-dir".into());
        args.push(dir.to_string_lossy().into_owned());
    }
    args.push("--client-name".into());
    args.push(options.client_name.clone());
    args.push("--client-version".into());
    args.push(options.client_version.clone());
    if options.verbose {
        args.push("--verbose".into());
    }
    args.push("--timeout".into());
    args.push(options.timeout_seconds.to_string());
    args.push("--retries".into());
    args.push(options.retries.to_string());
    args.push("--retry-backoff".into());
    args.push(options.retry_backoff.to_string());
    args
}

fn without_prefix(message: &str) -> &str {
    message.strip_prefix(ERROR_PREFIX).unwrap_or(message)
}

impl Fetcher for FetchCommand {
    #[instrument(level = "debug", skip_all, fields(program = %self.program))]
    fn fetch(&self, credential: &str, options: &FetchOptions) -> FetchOutcome {
        let args = fetch_args(credential, options);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self
            .runner
            .run(&self.program, &arg_refs)
            .map_err(|e| FetchFailure::new(format!("could not run {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        debug!(
            status = ?output.status.code(),
            stdout_len = stdout.len(),
            "fetch command finished"
        );

        if !output.status.success() {
            let message = if !stderr.is_empty() { stderr } else { stdout };
            let message = without_prefix(&message);
            return Err(FetchFailure::new(if message.is_empty() {
                "fetch failed"
            } else {
                message
            }));
        }

        if let Some(message) = stdout.strip_prefix(ERROR_PREFIX) {
            return Err(FetchFailure::new(message));
        }

        Ok(stdout)
    }
}
