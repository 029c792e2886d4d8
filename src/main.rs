//! tfadvisor - Terraform best-practice validation CLI
//!
//! Validates Terraform modules, suggests fixes, and serves both to AI
//! assistants over MCP.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries reports and JSON-RPC
    let filter = EnvFilter::try_from_env("TFADVISOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
