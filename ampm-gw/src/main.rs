//! ampm-gw (API Gateway) - Apple Music proxy backend
//!
//! Fronts the Apple Music API for the playlist-manager front end so the
//! browser never holds the developer or user tokens. Three operations:
//! playlist search, track listing, and library playlist creation.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use ampm_gw::upstream::{AppleMusicClient, Credentials};
use ampm_gw::{build_router, config, AppState};

#[derive(Debug, Parser)]
#[command(name = "ampm-gw", about = "Apple Music playlist gateway")]
struct Args {
    /// Path to the gateway config file (defaults to the AMPM config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting AMPM Gateway (ampm-gw) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    // Credential bootstrap may prompt on stdin; it runs to completion before
    // the server accepts any request
    let config = config::load(args.config, args.port)?;
    info!("Using storefront '{}'", config.storefront);

    let credentials = Credentials {
        developer_token: config.developer_token.clone(),
        user_token: config.user_token.clone(),
    };
    let client = AppleMusicClient::new(credentials, config.storefront.clone())?;

    let state = AppState::new(client);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("ampm-gw listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
