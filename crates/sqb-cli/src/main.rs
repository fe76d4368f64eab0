//! sqlbatch CLI - apply batch-delimited SQL migration files to a database

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{apply, common, verify};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Apply(args) => apply::execute(args, &cli.global).await,
        cli::Commands::Verify(args) => verify::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        // ExitCode carries a bare status; anything else gets printed.
        if let Some(code) = err.downcast_ref::<common::ExitCode>() {
            std::process::exit(code.0);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
