//! Error types for sqb-db

use thiserror::Error;

/// Database session errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Copy into the container failed (D003)
    #[error("[D003] Copy into container failed: {0}")]
    CopyFailed(String),

    /// SQL client exited non-zero (D004)
    #[error("[D004] SQL client exited with status {status}: {stderr}")]
    ClientFailed { status: i32, stderr: String },

    /// Subprocess or scratch-file I/O error (D005)
    #[error("[D005] Subprocess I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Count query output was not a number (D006)
    #[error("[D006] Could not parse a count from query output: {0}")]
    CountParse(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        // Errors reported by the server are execution errors; transport,
        // TLS, and configuration failures are connection errors.
        match &err {
            sqlx::Error::Database(db_err) => DbError::ExecutionError(db_err.to_string()),
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                DbError::ConnectionError(err.to_string())
            }
            _ => DbError::ExecutionError(err.to_string()),
        }
    }
}
