// Envsense Server - HTTP front for the simulated sensor fleet
// Copyright (c) 2025 Envsense Contributors
//
// Licensed under AGPL-3.0.
// See LICENSE file for details.

//! # Envsense Server
//!
//! HTTP API, Prometheus metrics and static front-end for the envsense fleet.
//!
//! ## Usage
//!
//! ```bash
//! # Serve on the default port with a random seed
//! envsense-server
//!
//! # Reproducible readings, smaller history, custom front-end directory
//! envsense-server --seed 42 --max-history 200 --static-dir ./public
//!
//! # Load a JSON fleet config; explicit flags override it
//! envsense-server --config fleet.json --port 9090
//! ```

mod api;
mod error;
mod metrics;

use api::AppState;
use clap::Parser;
use envsense::{Fleet, FleetConfig};
use error::ServerError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Envsense sensor fleet server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Directory served for non-API paths
    #[arg(long, default_value = "public")]
    static_dir: PathBuf,

    /// JSON fleet configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible readings
    #[arg(long)]
    seed: Option<u64>,

    /// Readings retained per sensor
    #[arg(long)]
    max_history: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Fleet configuration from the optional file plus flag overrides.
    fn fleet_config(&self) -> Result<FleetConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => {
                let display = path.display().to_string();
                let json = std::fs::read_to_string(path).map_err(|source| {
                    ServerError::ConfigRead {
                        path: display.clone(),
                        source,
                    }
                })?;
                FleetConfig::from_json(&json).map_err(|source| ServerError::ConfigParse {
                    path: display,
                    source,
                })?
            }
            None => FleetConfig::default(),
        };

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(max_history) = self.max_history {
            config = config.with_max_history(max_history);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Envsense Server v{}", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let config = args.fleet_config()?;
    info!(
        "Fleet: {} sensors, {} readings retained per sensor, seed {:?}",
        envsense::FLEET_SIZE,
        config.max_history,
        config.seed
    );

    let state = Arc::new(AppState::new(Fleet::with_config(config)));
    let app = api::router(state, args.static_dir.clone());

    let ip: std::net::IpAddr = args.host.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid host '{}', binding 0.0.0.0", args.host);
        [0, 0, 0, 0].into()
    });
    let addr = SocketAddr::new(ip, args.port);
    info!("Starting server on http://{}", addr);
    info!("Static files from {}", args.static_dir.display());

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
