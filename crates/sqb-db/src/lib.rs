//! sqb-db - Database session layer for sqlbatch
//!
//! This crate provides the `Connector` trait and its two strategies: an
//! in-process driver connection (sqlx/Postgres) and a containerized
//! command-line client (docker cp + docker exec).

pub mod container;
pub mod driver;
pub mod error;
pub mod traits;

use sqb_core::{Config, Strategy};

pub use container::ContainerConnector;
pub use driver::DriverConnector;
pub use error::{DbError, DbResult};
pub use traits::{Connector, ExecOutput, QueryOutput};

/// Open a connector for the given strategy.
///
/// The driver strategy connects eagerly and fails fast; the container
/// strategy performs no I/O until the first batch or query executes.
pub async fn connect(
    config: &Config,
    password: &str,
    strategy: Strategy,
) -> DbResult<Box<dyn Connector>> {
    match strategy {
        Strategy::Driver => Ok(Box::new(
            DriverConnector::connect(&config.connection, password).await?,
        )),
        Strategy::Container => Ok(Box::new(ContainerConnector::new(
            &config.connection,
            &config.container,
            password,
        ))),
    }
}
