//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqb_core::{Config, Strategy};
use sqb_db::Connector;
use std::fmt;
use std::path::Path;

use crate::cli::{GlobalArgs, StrategyArg};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error. If anyhow's Display chain ever reaches this
        // (e.g. downcast_ref fails in main.rs), we don't want "exit code N"
        // leaking into stderr.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Status for batch run operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RunStatus {
    Success,
    Error,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::Error => write!(f, "error"),
        }
    }
}

/// Load the project configuration, honoring the --config override.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(Path::new(&global.project_dir)),
    }
    .context("Failed to load project config")?;
    Ok(config)
}

/// Pick the session strategy: CLI flag wins over config.
pub(crate) fn resolve_strategy(arg: Option<StrategyArg>, config: &Config) -> Strategy {
    arg.map(Strategy::from).unwrap_or(config.connection.strategy)
}

/// Establish the configured database session.
pub(crate) async fn create_connector(
    config: &Config,
    strategy: Strategy,
    verbose: bool,
) -> Result<Box<dyn Connector>> {
    let password = config.connection.resolve_password()?;
    if verbose {
        eprintln!("[verbose] Using {} strategy", strategy);
    }
    let conn = sqb_db::connect(config, &password, strategy)
        .await
        .context("Failed to establish database session")?;
    Ok(conn)
}

/// Generic wrapper for command results written to JSON.
///
/// A JSON file with a timestamp, elapsed seconds, success/failure counts,
/// and a vec of per-item results. `CommandResults<T>` captures that
/// envelope so each command only needs its per-item result type.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommandResults<T: Serialize> {
    pub timestamp: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<T>,
}

/// Serialize `data` as pretty-printed JSON and write it to `path`.
///
/// Creates any missing parent directories before writing.  Returns an
/// `anyhow::Result` with context describing which step failed.
pub(crate) fn write_json_results<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create target directory")?;
    }
    let json = serde_json::to_string_pretty(data).context("Failed to serialize results")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
