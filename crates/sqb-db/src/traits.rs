//! Connector trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Output captured from executing one batch.
#[derive(Debug, Clone, Default)]
pub struct ExecOutput {
    /// Textual output from the client or driver, when any was produced
    pub output: Option<String>,
}

/// Raw output from a verification query.
#[derive(Debug, Clone)]
pub struct QueryOutput {
    /// Result text for human inspection — no structured parsing
    pub stdout: String,

    /// Non-benign stderr captured during the query, if any
    pub warnings: Option<String>,
}

/// A session capable of executing arbitrary SQL text against the target
/// database.
///
/// One connector instance is used exclusively and serially by a single
/// command invocation, so implementations only need to be Send.
#[async_trait]
pub trait Connector: Send {
    /// Open a transaction, where the strategy supports one
    async fn begin(&mut self) -> DbResult<()>;

    /// Execute one batch of SQL statements
    async fn execute_batch(&mut self, sql: &str) -> DbResult<ExecOutput>;

    /// Commit work performed since `begin`, where the strategy supports one
    async fn commit(&mut self) -> DbResult<()>;

    /// Run a query and return its raw textual output
    async fn query_raw(&mut self, sql: &str) -> DbResult<QueryOutput>;

    /// Run a scalar count query
    async fn query_count(&mut self, sql: &str) -> DbResult<i64>;

    /// Strategy identifier for logging
    fn strategy(&self) -> &'static str;
}
