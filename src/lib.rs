//! Render fetched EnvKey configuration as shell text for `eval`.
//!
//! Layers, innermost first: [`domain`] (pure rendering and classification),
//! [`application`] (services), [`infrastructure`] (I/O traits, fetch
//! adapter, wiring), [`cli`].

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
