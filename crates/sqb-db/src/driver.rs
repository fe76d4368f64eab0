//! Driver strategy: an in-process Postgres connection via sqlx

use crate::error::{DbError, DbResult};
use crate::traits::{Connector, ExecOutput, QueryOutput};
use async_trait::async_trait;
use sqb_core::ConnectionConfig;
use sqlx::postgres::{PgConnectOptions, PgRow, PgSslMode};
use sqlx::{Column, Connection, PgConnection, Row, TypeInfo};

/// Driver-backed connector holding a single dedicated connection.
///
/// All batches of one apply run inside one transaction: `begin` and
/// `commit` issue explicit BEGIN/COMMIT on the connection, so a failed
/// batch leaves nothing committed.
pub struct DriverConnector {
    conn: PgConnection,
}

impl DriverConnector {
    /// Connect using the configured host, port, database, and credentials.
    pub async fn connect(config: &ConnectionConfig, password: &str) -> DbResult<Self> {
        // The trust flag maps to Require: encrypted, but the server
        // certificate is not verified against a CA.
        let ssl_mode = if config.trust_certificate {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.username)
            .password(password)
            .ssl_mode(ssl_mode);

        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        log::debug!(
            "Connected to {}:{}/{}",
            config.host,
            config.port,
            config.database
        );

        Ok(Self { conn })
    }
}

#[async_trait]
impl Connector for DriverConnector {
    async fn begin(&mut self) -> DbResult<()> {
        run_raw(&mut self.conn, "BEGIN").await?;
        Ok(())
    }

    async fn execute_batch(&mut self, sql: &str) -> DbResult<ExecOutput> {
        // raw_sql permits multiple statements per batch
        let rows = run_raw(&mut self.conn, sql).await?;
        Ok(ExecOutput {
            output: (rows > 0).then(|| format!("{} rows affected", rows)),
        })
    }

    async fn commit(&mut self) -> DbResult<()> {
        run_raw(&mut self.conn, "COMMIT").await?;
        Ok(())
    }

    async fn query_raw(&mut self, sql: &str) -> DbResult<QueryOutput> {
        let rows = sqlx::query(sql).fetch_all(&mut self.conn).await?;

        let mut stdout = String::new();
        if let Some(first) = rows.first() {
            let headers: Vec<&str> = first.columns().iter().map(|c| c.name()).collect();
            stdout.push_str(&headers.join(","));
            stdout.push('\n');
        }
        for row in &rows {
            let cells: Vec<String> = (0..row.columns().len())
                .map(|i| format_value(row, i))
                .collect();
            stdout.push_str(&cells.join(","));
            stdout.push('\n');
        }

        Ok(QueryOutput {
            stdout,
            warnings: None,
        })
    }

    async fn query_count(&mut self, sql: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&mut self.conn).await?;
        Ok(count)
    }

    fn strategy(&self) -> &'static str {
        "driver"
    }
}

/// Execute raw SQL (possibly multiple statements) and report rows affected.
///
/// Kept as a free async fn so the `Executor` lifetime elaborates correctly;
/// inlining this into the `#[async_trait]` methods trips a higher-ranked
/// lifetime inference bug.
async fn run_raw(conn: &mut PgConnection, sql: &str) -> DbResult<u64> {
    use sqlx::Executor as _;
    let result = conn.execute(sqlx::raw_sql(sql)).await?;
    Ok(result.rows_affected())
}

/// Best-effort textual rendering of a result cell.
///
/// Tries the common decodings in order; anything exotic renders as its
/// type name so the row still lines up.
fn format_value(row: &PgRow, idx: usize) -> String {
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return opt_to_string(v);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return opt_to_string(v);
    }
    if let Ok(v) = row.try_get::<Option<i32>, _>(idx) {
        return opt_to_string(v);
    }
    if let Ok(v) = row.try_get::<Option<i16>, _>(idx) {
        return opt_to_string(v);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return opt_to_string(v);
    }
    if let Ok(v) = row.try_get::<Option<bool>, _>(idx) {
        return opt_to_string(v);
    }
    format!("<{}>", row.column(idx).type_info().name())
}

fn opt_to_string<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "NULL".to_string())
}
