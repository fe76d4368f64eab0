//! Container strategy: a command-line SQL client exec'd in the database
//! container.
//!
//! Each batch crosses the container boundary as a file: the SQL is written
//! to a host scratch file, copied in with `docker cp`, and executed with
//! `docker exec <container> <client> ... -i <file> -C`. The scratch file
//! is removed when the connector drops it; the container-side copy is
//! overwritten on the next batch.

use crate::error::{DbError, DbResult};
use crate::traits::{Connector, ExecOutput, QueryOutput};
use async_trait::async_trait;
use sqb_core::{ConnectionConfig, ContainerConfig};
use tokio::process::Command;

/// Connector that shells out to a SQL client inside a named container.
pub struct ContainerConnector {
    docker_bin: String,
    container: String,
    client_path: String,
    server: String,
    remote_path: String,
    database: String,
    username: String,
    password: String,
}

impl ContainerConnector {
    /// Build a connector from config. No I/O happens until the first
    /// batch or query executes.
    pub fn new(connection: &ConnectionConfig, container: &ContainerConfig, password: &str) -> Self {
        Self {
            docker_bin: container.docker_bin.clone(),
            container: container.name.clone(),
            client_path: container.client_path.clone(),
            server: container.server.clone(),
            remote_path: container.remote_path.clone(),
            database: connection.database.clone(),
            username: connection.username.clone(),
            password: password.to_string(),
        }
    }

    /// Arguments for `docker exec` running the client against the
    /// copied-in file. Query mode adds the column-separator and
    /// no-width-padding flags used for verification output.
    fn client_args(&self, query_mode: bool) -> Vec<String> {
        let mut args = vec![
            "exec".to_string(),
            self.container.clone(),
            self.client_path.clone(),
            "-S".to_string(),
            self.server.clone(),
            "-U".to_string(),
            self.username.clone(),
            "-P".to_string(),
            self.password.clone(),
            "-d".to_string(),
            self.database.clone(),
            "-i".to_string(),
            self.remote_path.clone(),
            "-C".to_string(),
        ];
        if query_mode {
            args.extend(["-s".to_string(), ",".to_string(), "-W".to_string()]);
        }
        args
    }

    /// Write the SQL to a scratch file, copy it into the container, and
    /// run the client over it.
    async fn run_sql(&self, sql: &str, query_mode: bool) -> DbResult<std::process::Output> {
        let scratch = tempfile::NamedTempFile::new()?;
        std::fs::write(scratch.path(), sql)?;

        let target = format!("{}:{}", self.container, self.remote_path);
        let copy = Command::new(&self.docker_bin)
            .arg("cp")
            .arg(scratch.path())
            .arg(&target)
            .output()
            .await?;
        if !copy.status.success() {
            return Err(DbError::CopyFailed(
                String::from_utf8_lossy(&copy.stderr).trim().to_string(),
            ));
        }

        log::debug!("Executing {} bytes via {}", sql.len(), self.client_path);

        let output = Command::new(&self.docker_bin)
            .args(self.client_args(query_mode))
            .output()
            .await?;
        Ok(output)
    }
}

#[async_trait]
impl Connector for ContainerConnector {
    async fn begin(&mut self) -> DbResult<()> {
        // Each client invocation autocommits; there is no session-spanning
        // transaction to open.
        Ok(())
    }

    async fn execute_batch(&mut self, sql: &str) -> DbResult<ExecOutput> {
        let output = self.run_sql(sql, false).await?;
        if !output.status.success() {
            return Err(DbError::ClientFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(ExecOutput {
            output: (!stdout.is_empty()).then_some(stdout),
        })
    }

    async fn commit(&mut self) -> DbResult<()> {
        Ok(())
    }

    async fn query_raw(&mut self, sql: &str) -> DbResult<QueryOutput> {
        let output = self.run_sql(sql, true).await?;
        if !output.status.success() {
            return Err(DbError::ClientFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(QueryOutput {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            warnings: filter_benign_stderr(&String::from_utf8_lossy(&output.stderr)),
        })
    }

    async fn query_count(&mut self, sql: &str) -> DbResult<i64> {
        let result = self.query_raw(sql).await?;
        parse_count(&result.stdout)
    }

    fn strategy(&self) -> &'static str {
        "container"
    }
}

/// Drop client noise from stderr, keeping only lines worth surfacing.
///
/// sqlcmd prints informational `Sqlcmd: ...` lines (certificate-trust
/// notices and the like) on stderr even for successful runs.
fn filter_benign_stderr(stderr: &str) -> Option<String> {
    let kept: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.contains("Sqlcmd:")
        })
        .collect();
    (!kept.is_empty()).then(|| kept.join("\n"))
}

/// Pull the scalar count out of the client's formatted query output.
///
/// The client prints a header row, a dash separator, the value, and a
/// rows-affected trailer; the count is the first line that parses as an
/// integer on its own.
fn parse_count(stdout: &str) -> DbResult<i64> {
    stdout
        .lines()
        .find_map(|line| line.trim().parse::<i64>().ok())
        .ok_or_else(|| DbError::CountParse(stdout.trim().to_string()))
}

#[cfg(test)]
#[path = "container_test.rs"]
mod tests;
