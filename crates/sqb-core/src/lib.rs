//! sqb-core - Core library for sqlbatch
//!
//! This crate provides the shared types, configuration parsing, and batch
//! splitting used by the sqlbatch connector and CLI crates.

pub mod batch;
pub mod config;
pub mod error;
pub mod migration;

pub use batch::{split_batches, Batch};
pub use config::{
    Config, ConnectionConfig, ContainerConfig, PostCheck, Strategy, VerifyCheck, PASSWORD_ENV_VAR,
};
pub use error::CoreError;
pub use migration::MigrationFile;
