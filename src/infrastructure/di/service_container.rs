//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{CredentialResolver, SourceService};
use crate::config::Settings;
use crate::infrastructure::fetch::FetchCommand;
use crate::infrastructure::traits::{
    CommandRunner, EnvReader, Fetcher, FileSystem, ProcessEnv, RealCommandRunner, RealFileSystem,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Calling process environment
    pub env: Arc<dyn EnvReader>,

    /// Fetch collaborator
    pub fetcher: Arc<dyn Fetcher>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let runner: Arc<dyn CommandRunner> = Arc::new(RealCommandRunner);
        let fetcher = Arc::new(FetchCommand::new(settings.fetch_command.clone(), runner));
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(ProcessEnv),
            fetcher,
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn EnvReader>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            env,
            fetcher,
        }
    }

    pub fn source_service(&self) -> SourceService {
        SourceService::new(self.fetcher.clone(), self.env.clone())
    }

    pub fn credential_resolver(&self) -> CredentialResolver {
        CredentialResolver::new(self.fs.clone(), self.env.clone())
    }
}
