//! Apply command implementation - execute migration batches in order

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use sqb_core::{Batch, MigrationFile, PostCheck};
use sqb_db::Connector;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::commands::common::{self, ExitCode, RunStatus};

/// Result of executing a single batch.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct BatchRunResult {
    pub(crate) index: usize,
    pub(crate) status: RunStatus,
    pub(crate) duration_secs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

/// Execute the apply command
pub async fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let project_dir = Path::new(&global.project_dir);
    let config = common::load_config(global)?;

    let file = args
        .file
        .clone()
        .or_else(|| config.default_migration.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("No migration file given and no default_migration configured")
        })?;
    let path = resolve_migration_path(project_dir, &file);

    println!("Applying migration: {}", file);
    println!(
        "Target: {}/{}\n",
        config.connection.host, config.connection.database
    );

    // Read and split before any connection or container interaction, so a
    // missing file never touches the database side.
    let migration = MigrationFile::read(&path)?;
    let batches = migration.batches(&config.delimiter);
    if batches.is_empty() {
        println!("No executable batches found in {}", file);
        return Ok(());
    }
    println!("Found {} SQL batches to execute\n", batches.len());

    let strategy = common::resolve_strategy(args.strategy, &config);
    let mut conn = common::create_connector(&config, strategy, global.verbose).await?;

    conn.begin().await?;

    let progress = (!args.quiet).then(|| build_progress_bar(batches.len()));
    let (results, failed) = run_batches(conn.as_mut(), &batches, progress.as_ref()).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let elapsed = start_time.elapsed();
    write_results(
        &config.target_path_absolute(project_dir),
        &results,
        elapsed.as_secs_f64(),
    );

    if failed.is_some() {
        return Err(ExitCode(1).into());
    }

    conn.commit().await?;

    if let Some(check) = &config.post_check {
        run_post_check(conn.as_mut(), check).await;
    }

    println!(
        "\nAll batches executed successfully. [{}ms]",
        elapsed.as_millis()
    );
    Ok(())
}

/// Execute batches in order, stopping at the first failure.
///
/// Returns the per-batch results and the index of the failed batch, if
/// any. Batches after a failure are never attempted; already-committed
/// effects of earlier batches are left in place.
pub(crate) async fn run_batches(
    conn: &mut dyn Connector,
    batches: &[Batch],
    progress: Option<&ProgressBar>,
) -> (Vec<BatchRunResult>, Option<usize>) {
    let total = batches.len();
    let mut results = Vec::with_capacity(total);

    for batch in batches {
        if let Some(pb) = progress {
            pb.set_message(format!("batch {}/{}", batch.index, total));
        }
        println!("Executing batch {}/{}...", batch.index, total);

        let batch_start = Instant::now();
        match conn.execute_batch(&batch.sql).await {
            Ok(exec) => {
                let duration = batch_start.elapsed();
                println!(
                    "  ✓ Batch {} executed [{}ms]",
                    batch.index,
                    duration.as_millis()
                );
                if let Some(output) = &exec.output {
                    println!("    Output: {}", output);
                }
                results.push(BatchRunResult {
                    index: batch.index,
                    status: RunStatus::Success,
                    duration_secs: duration.as_secs_f64(),
                    output: exec.output,
                    error: None,
                });
            }
            Err(e) => {
                let duration = batch_start.elapsed();
                println!("  ✗ Batch {} failed: {}", batch.index, e);
                results.push(BatchRunResult {
                    index: batch.index,
                    status: RunStatus::Error,
                    duration_secs: duration.as_secs_f64(),
                    output: None,
                    error: Some(e.to_string()),
                });
                return (results, Some(batch.index));
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    (results, None)
}

/// Run the configured post-condition check.
///
/// Informational only — a failed or unconfirmed check prints a warning
/// and never affects the exit status.
async fn run_post_check(conn: &mut dyn Connector, check: &PostCheck) {
    match conn.query_count(&check.query).await {
        Ok(count) if count >= check.expect => {
            println!("  ✓ Verified: {}", check.description);
        }
        Ok(_) => {
            println!("  ⚠ Warning: {} not confirmed", check.description);
        }
        Err(e) => {
            println!("  ⚠ Warning: post-check query failed: {}", e);
        }
    }
}

/// Relative migration paths resolve against the project directory.
fn resolve_migration_path(project_dir: &Path, file: &str) -> PathBuf {
    let path = Path::new(file);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_dir.join(path)
    }
}

fn build_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Write the per-batch results envelope to `<target>/apply_results.json`.
///
/// Failures to write are warnings, not errors — the apply outcome stands.
fn write_results(target_dir: &Path, results: &[BatchRunResult], elapsed_secs: f64) {
    let success_count = results
        .iter()
        .filter(|r| matches!(r.status, RunStatus::Success))
        .count();
    let envelope = common::CommandResults {
        timestamp: chrono::Utc::now(),
        elapsed_secs,
        success_count,
        failure_count: results.len() - success_count,
        results: results.to_vec(),
    };

    let path = target_dir.join("apply_results.json");
    if let Err(e) = common::write_json_results(&path, &envelope) {
        log::warn!("Failed to write {}: {}", path.display(), e);
    }
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
