// ABOUTME: HTTP server binary for the volume optimizer API
// ABOUTME: Loads configuration, opens the store, and serves the router until Ctrl+C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Volume Optimizer

//! # Volume Optimizer Server Binary

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use volume_optimizer::{
    config::{DatabaseUrl, ServerConfig},
    logging,
    resources::ServerResources,
    routes,
};

/// Command-line overrides applied on top of the environment
#[derive(Parser)]
#[command(name = "volume-optimizer-server")]
#[command(about = "Volume Optimizer - tier-gated weekly training volume recommendations")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database = DatabaseUrl::parse_url(&database_url);
    }

    info!("Starting Volume Optimizer");
    info!("{}", config.summary());

    let bind_address = config.bind_address();
    let resources = Arc::new(
        ServerResources::from_config(config)
            .await
            .context("Failed to initialize server resources")?,
    );
    let app = routes::build_router(resources);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!("Listening on {bind_address}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
