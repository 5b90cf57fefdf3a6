mod app_system;
mod cli;
mod clients;
mod config;
mod controller;
mod domain;
mod error;
mod http_service;
mod renderer;
mod view_state;

#[cfg(test)]
mod mock_framework;

use clap::Parser;
use tracing::{error, info};

use crate::app_system::{level_for_verbosity, setup_tracing};
use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = CliArgs::parse();

    // Setup tracing once for the entire application
    setup_tracing(level_for_verbosity(args.verbose));

    info!(command = ?args.command, "Starting product admin");

    match cli::run(args).await {
        Ok(()) => {
            info!("Product admin finished");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Product admin failed");
            Err(e)
        }
    }
}
