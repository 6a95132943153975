//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::OutputDialect;

/// Sets shell environment variables with an ENVKEY
#[derive(Parser, Debug)]
#[command(name = "envkey-source")]
#[command(author, version, about, long_about = None)]
#[command(override_usage = "eval \"$(envkey-source [ENVKEY] [OPTIONS])\"\n       \
    eval \"$(envkey-source [OPTIONS])\"  # with ENVKEY=... in ./.env")]
pub struct Cli {
    /// Credential to fetch (default: $ENVKEY, then ENVKEY in ./.env)
    pub envkey: Option<String>,

    /// Overwrite variables already set in the environment
    #[arg(short, long)]
    pub force: bool,

    /// Cache encrypted config locally for offline use
    #[arg(long)]
    pub cache: bool,

    /// Do NOT cache encrypted config (wins over --cache and ./.env detection)
    #[arg(long)]
    pub no_cache: bool,

    /// Cache directory (default: ~/.envkey/cache)
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub cache_dir: Option<PathBuf>,

    /// One `export KEY='value'` per line, compatible with pam_env
    #[arg(long, conflicts_with = "dot_env_compatible")]
    pub pam_compatible: bool,

    /// `'KEY'='value'` lines suitable for a .env file
    #[arg(long)]
    pub dot_env_compatible: bool,

    /// Verbose output from the fetch step
    #[arg(short, long)]
    pub verbose: bool,

    /// Network timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<f64>,

    /// Number of times to retry a failed request
    #[arg(long, value_name = "N")]
    pub retries: Option<u8>,

    /// Retry backoff factor
    #[arg(long, value_name = "FACTOR")]
    pub retry_backoff: Option<f64>,

    /// Settings file (default: $XDG_CONFIG_HOME/envkey-source/envkey-source.toml)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Log to stderr: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print shell completions and exit
    #[arg(long = "completions", value_name = "SHELL", value_enum)]
    pub generator: Option<clap_complete::Shell>,
}

impl Cli {
    pub fn dialect(&self) -> OutputDialect {
        if self.pam_compatible {
            OutputDialect::PamCompatible
        } else if self.dot_env_compatible {
            OutputDialect::DotEnv
        } else {
            OutputDialect::PosixExport
        }
    }
}
