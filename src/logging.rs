//! Logging setup for the terminal binary.
//!
//! The game owns the terminal while it runs, so logs can never go to stderr.
//! With a log path configured, `env_logger` writes there (filter via `RUST_LOG`,
//! default `info`); without one, no logger is installed and the `log` macros in
//! the core are no-ops.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Env, Target};

/// Install the file logger. Returns whether a logger was installed.
pub fn init(path: Option<&Path>) -> Result<bool> {
    let Some(path) = path else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;

    Ok(true)
}
