mod auth;
mod cli;
mod client;
mod config;
mod logging;
mod report;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.run().await
}
