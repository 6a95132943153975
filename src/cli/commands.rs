//! Command execution

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::services::ShellOutput;
use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{should_cache, FetchOptions, RenderOptions};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Load settings, wire real services and source the credential.
pub fn execute_command(cli: &Cli) -> CliResult<ShellOutput> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("effective settings:\n{}", settings.to_toml()?);

    let cwd = std::env::current_dir()
        .map_err(|e| InfraError::io("determine working directory", e))?;
    let container = ServiceContainer::new(settings);
    run(cli, &container, &cwd)
}

/// Source the credential for `cli` using the services in `container`.
///
/// `dir` is where the local `.env` file is looked up.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub fn run(cli: &Cli, container: &ServiceContainer, dir: &Path) -> CliResult<ShellOutput> {
    let resolver = container.credential_resolver();
    let local_env_file = resolver.has_local_env_file(dir);
    let credential = resolver.resolve(cli.envkey.as_deref(), dir)?;

    let fetch = fetch_options(cli, &container.settings, local_env_file)?;
    debug!(should_cache = fetch.should_cache, local_env_file, "fetch options resolved");

    let render = RenderOptions {
        force: cli.force,
        dialect: cli.dialect(),
    };

    Ok(container
        .source_service()
        .source(&credential, &fetch, &render))
}

/// Merge CLI flags over settings into the fetch collaborator's options.
pub fn fetch_options(
    cli: &Cli,
    settings: &Settings,
    local_env_file: bool,
) -> CliResult<FetchOptions> {
    if cli.cache && cli.no_cache {
        output::warning("both --cache and --no-cache given; not caching");
    }

    let timeout_seconds = cli.timeout.unwrap_or(settings.timeout_seconds);
    if !(timeout_seconds.is_finite() && timeout_seconds > 0.0) {
        return Err(CliError::InvalidArgs(format!(
            "timeout must be a positive number of seconds, got {timeout_seconds}"
        )));
    }
    let retry_backoff = cli.retry_backoff.unwrap_or(settings.retry_backoff);
    if !(retry_backoff.is_finite() && retry_backoff >= 0.0) {
        return Err(CliError::InvalidArgs(format!(
            "retry backoff must not be negative, got {retry_backoff}"
        )));
    }

    Ok(FetchOptions {
        should_cache: should_cache(cli.cache, cli.no_cache, local_env_file),
        cache_dir: Some(
            cli.cache_dir
                .clone()
                .unwrap_or_else(|| settings.cache_dir.clone()),
        ),
        client_name: settings.client_name.clone(),
        client_version: env!("CARGO_PKG_VERSION").to_string(),
        verbose: cli.verbose,
        timeout_seconds,
        retries: cli.retries.unwrap_or(settings.retries),
        retry_backoff,
    })
}
