//! CLI definitions for task-tracker.
//!
//! Flags override values from the config file and environment.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Task tracker HTTP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (default: ./task-tracker.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Do not insert demo tasks into an empty database
    #[arg(long)]
    pub no_seed: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    pub log: String,
}

impl Cli {
    /// Apply command-line overrides on top of the resolved config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(db_path) = &self.database {
            config.server.db_path = db_path.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.no_seed {
            config.server.seed_demo_data = false;
        }
    }
}
