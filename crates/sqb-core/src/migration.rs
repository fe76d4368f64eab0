//! Migration file loading

use crate::batch::{split_batches, Batch};
use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// A migration file read from disk.
///
/// Carries no identity beyond its path: no checksum, no version number,
/// no record of whether it was applied before.
#[derive(Debug, Clone)]
pub struct MigrationFile {
    /// Path the file was read from
    pub path: PathBuf,

    /// Raw file contents
    pub contents: String,
}

impl MigrationFile {
    /// Read a migration file from disk.
    ///
    /// A missing file is a hard error — callers check this before any
    /// database or container interaction.
    pub fn read(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::MigrationNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        log::debug!("Read {} bytes from {}", contents.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Split the file contents into executable batches.
    pub fn batches(&self, delimiter: &str) -> Vec<Batch> {
        split_batches(&self.contents, delimiter)
    }
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
