//! Verify command implementation - print raw metadata query output

use anyhow::Result;

use crate::cli::{GlobalArgs, VerifyArgs};
use crate::commands::common::{self, ExitCode};

/// Execute the verify command.
///
/// Runs each configured (label, query) check in order and prints the raw
/// output for manual inspection. No structured parsing happens here.
pub async fn execute(args: &VerifyArgs, global: &GlobalArgs) -> Result<()> {
    let config = common::load_config(global)?;

    if config.checks.is_empty() {
        println!("No verification checks configured.");
        return Ok(());
    }

    let strategy = common::resolve_strategy(args.strategy, &config);
    let mut conn = common::create_connector(&config, strategy, global.verbose).await?;

    for check in &config.checks {
        println!("\n{}", "=".repeat(60));
        println!("{}", check.label);
        println!("{}", "=".repeat(60));

        match conn.query_raw(&check.query).await {
            Ok(result) => {
                println!("{}", result.stdout);
                if let Some(warnings) = result.warnings {
                    println!("Warnings: {}", warnings);
                }
            }
            Err(e) => {
                println!("✗ {} failed: {}", check.label, e);
                return Err(ExitCode(1).into());
            }
        }
    }

    Ok(())
}
