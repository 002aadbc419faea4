//! Task Tracker
//!
//! HTTP service for creating, listing, toggling and deleting tasks stored in
//! SQLite.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use task_tracker::api;
use task_tracker::cli::Cli;
use task_tracker::config::Config;
use task_tracker::db::Database;
use task_tracker::logging::{self, LogTarget};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::resolve(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    debug!(?config, "Configuration resolved");

    run_server(config).await
}

async fn run_server(config: Config) -> Result<()> {
    config.ensure_db_dir()?;
    let db = Database::open(&config.server.db_path)?;
    info!("Database opened at {}", config.server.db_path.display());

    if config.server.seed_demo_data {
        let seeded = db.seed_demo_tasks()?;
        if seeded > 0 {
            info!("Seeded {} demo tasks", seeded);
        }
    }

    let handle = api::start_server(Arc::new(db), &config.server.host, config.server.port).await?;
    info!("Server is running on port {}", handle.addr().port());

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    handle.shutdown().await;

    Ok(())
}
