//! Configuration types and parsing for sqlbatch.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted for the database password.
///
/// Takes precedence over the `connection.password` config field so that
/// credentials never have to live in the project file.
pub const PASSWORD_ENV_VAR: &str = "SQB_DB_PASSWORD";

/// Main project configuration from sqlbatch.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Batch separator token. Batches are produced by a literal,
    /// case-sensitive split on this token — no SQL awareness.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Migration file applied when `sqb apply` is invoked without one
    #[serde(default)]
    pub default_migration: Option<String>,

    /// Output directory for apply result JSON
    #[serde(default = "default_target_path")]
    pub target_path: String,

    /// Database connection configuration
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Container boundary configuration (used by the container strategy)
    #[serde(default)]
    pub container: ContainerConfig,

    /// Optional post-condition check run after a successful apply
    #[serde(default)]
    pub post_check: Option<PostCheck>,

    /// Verification checks run by `sqb verify`, in order
    #[serde(default)]
    pub checks: Vec<VerifyCheck>,
}

/// Session strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// In-process driver connection (sqlx/Postgres)
    Driver,
    /// Containerized command-line client (docker cp + docker exec)
    #[default]
    Container,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Driver => write!(f, "driver"),
            Strategy::Container => write!(f, "container"),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Session strategy (driver or container)
    #[serde(default)]
    pub strategy: Strategy,

    /// Database host (driver strategy)
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port (driver strategy)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Target database name
    #[serde(default)]
    pub database: String,

    /// Login username
    #[serde(default)]
    pub username: String,

    /// Login password. Prefer the SQB_DB_PASSWORD environment variable;
    /// this field exists for throwaway local setups only.
    #[serde(default)]
    pub password: Option<String>,

    /// Trust the server certificate without CA verification
    #[serde(default)]
    pub trust_certificate: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            host: default_host(),
            port: default_port(),
            database: String::new(),
            username: String::new(),
            password: None,
            trust_certificate: false,
        }
    }
}

impl ConnectionConfig {
    /// Resolve the database password.
    ///
    /// Precedence: `SQB_DB_PASSWORD` environment variable, then the
    /// `password` config field. Errors when neither is set.
    pub fn resolve_password(&self) -> CoreResult<String> {
        if let Ok(password) = std::env::var(PASSWORD_ENV_VAR) {
            if !password.is_empty() {
                return Ok(password);
            }
        }
        match &self.password {
            Some(password) if !password.is_empty() => {
                log::warn!(
                    "Using password from config file; prefer the {} environment variable",
                    PASSWORD_ENV_VAR
                );
                Ok(password.clone())
            }
            _ => Err(CoreError::PasswordMissing {
                env_var: PASSWORD_ENV_VAR.to_string(),
            }),
        }
    }
}

/// Container boundary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Name of the container hosting the database
    #[serde(default)]
    pub name: String,

    /// Path of the SQL command-line client inside the container
    #[serde(default = "default_client_path")]
    pub client_path: String,

    /// Server name as seen from inside the container
    #[serde(default = "default_host")]
    pub server: String,

    /// Scratch path inside the container for batch files
    #[serde(default = "default_remote_path")]
    pub remote_path: String,

    /// Container management binary on the host
    #[serde(default = "default_docker_bin")]
    pub docker_bin: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            client_path: default_client_path(),
            server: default_host(),
            remote_path: default_remote_path(),
            docker_bin: default_docker_bin(),
        }
    }
}

/// Post-condition check run after a successful apply.
///
/// Informational only — the check never affects the exit status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCheck {
    /// Count query; the check passes when the result is at least `expect`
    pub query: String,

    /// Minimum count for the check to pass
    #[serde(default = "default_expect")]
    pub expect: i64,

    /// Human-readable description printed with the pass/warn message
    pub description: String,
}

/// A single (label, query) verification entry for `sqb verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCheck {
    /// Section header printed before the query output
    pub label: String,

    /// Query whose raw output is printed for manual inspection
    pub query: String,
}

fn default_delimiter() -> String {
    "GO".to_string()
}

fn default_target_path() -> String {
    "target".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_client_path() -> String {
    "/opt/mssql-tools18/bin/sqlcmd".to_string()
}

fn default_remote_path() -> String {
    "/tmp/sqlbatch.sql".to_string()
}

fn default_docker_bin() -> String {
    "docker".to_string()
}

fn default_expect() -> i64 {
    1
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    /// Looks for sqlbatch.yml or sqlbatch.yaml.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("sqlbatch.yml");
        let yaml_path = dir.join("sqlbatch.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.delimiter.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "delimiter cannot be empty".to_string(),
            });
        }

        if self.connection.database.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "connection.database must be set".to_string(),
            });
        }

        if self.connection.username.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "connection.username must be set".to_string(),
            });
        }

        if self.connection.strategy == Strategy::Container && self.container.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "container.name must be set when the container strategy is selected"
                    .to_string(),
            });
        }

        Ok(())
    }

    /// Get the absolute target path relative to a project root
    pub fn target_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.target_path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
