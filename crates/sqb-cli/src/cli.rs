//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use sqb_core::Strategy;

/// sqlbatch - apply batch-delimited SQL migration files to a database
#[derive(Parser, Debug)]
#[command(name = "sqb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a migration file batch by batch
    Apply(ApplyArgs),

    /// Run the configured verification queries and print raw output
    Verify(VerifyArgs),
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Migration file to apply (default: the configured default_migration)
    pub file: Option<String>,

    /// Override the configured session strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Override the configured session strategy
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Session strategy selector (CLI mirror of the config enum)
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    /// In-process driver connection
    Driver,
    /// Containerized command-line client
    Container,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Driver => Strategy::Driver,
            StrategyArg::Container => Strategy::Container,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
