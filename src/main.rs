//! Main entry point for the trivia API server.
//!
//! This module parses the command line, initializes logging, loads environment
//! variables and configuration, opens the database and serves the HTTP API.

mod api;
mod cli;
mod config;
mod core;
mod db;
mod errors;
mod schema;
mod utils;

use clap::Parser;
use config::ServerConfig;
use db::{CategoryRepository, Database};
use tracing::{error, info, warn};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Initialize logging system
/// 3. Load environment variables and configuration
/// 4. Open the database, optionally seeding categories
/// 5. Serve the API until shutdown
#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let database = match Database::open(&config.database_path) {
        Ok(database) => database,
        Err(e) => {
            error!("Failed to open database {}: {}", config.database_path, e);
            std::process::exit(1);
        }
    };

    if cli.seed_categories {
        if let Err(e) = seed_categories(&database) {
            error!("Failed to seed categories: {}", e);
            std::process::exit(1);
        }
    }

    info!("Starting API server on port {}", config.port);
    if let Err(e) = api::server::launch_server(database, config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Builds the effective configuration: file (or defaults), then `DATABASE_PATH`, then CLI flags
fn resolve_config(cli: &cli::Cli) -> Result<ServerConfig, errors::Error> {
    let mut config = match &cli.config {
        Some(path) => config::load_server_config(path)?,
        None => ServerConfig::default(),
    };

    if let Ok(path) = std::env::var("DATABASE_PATH") {
        config.database_path = path;
    }
    if let Some(path) = &cli.database_path {
        config.database_path = path.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    Ok(config)
}

fn seed_categories(database: &Database) -> Result<(), errors::Error> {
    let mut conn = database.get_conn()?;
    let inserted = CategoryRepository::new(&mut conn).seed_default_categories()?;
    if inserted > 0 {
        info!("Seeded {} categories", inserted);
    } else {
        info!("Categories already present, skipping seed");
    }
    Ok(())
}
