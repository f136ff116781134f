//! Application entry point for rental-stats.
//!
//! Loads configuration, then serves the dashboard and relay routes until Ctrl+C.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use log::debug;
use log::info;
use log::warn;
use rental_stats::config::Config;
use rental_stats::error::AppError;
use rental_stats::logging::setup_logging;
use rental_stats::relay::upstream::WebhookClient;
use rental_stats::server::AppState;
use rental_stats::server::router;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config()?;
    let state = setup_state(&config)?;
    let listener = bind(&config).await?;

    run(listener, state, init_start).await
}

fn load_config() -> Result<Config> {
    let config = Config::load()?;
    setup_logging(&config)?;
    info!("Starting rental-stats...");
    Ok(config)
}

fn setup_state(config: &Config) -> Result<AppState> {
    debug!("Setting up relays...");
    let upstream = Arc::new(WebhookClient::new()?);
    let state = AppState::new(config, upstream)?;

    for relay in [&state.workflow, &state.contacts] {
        if !relay.is_configured() {
            warn!(
                "{} is not set; its routes will answer 500 until configured",
                relay.key()
            );
        }
    }

    Ok(state)
}

async fn bind(config: &Config) -> Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| AppError::BindFailed {
            addr: config.bind_addr.to_string(),
            source,
        })?;
    info!("Listening on {}", config.bind_addr);
    Ok(listener)
}

async fn run(listener: TcpListener, state: AppState, init_start: Instant) -> Result<()> {
    info!(
        "rental-stats is up in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Ctrl+C received, shutting down."),
                Err(e) => {
                    warn!("Failed to listen for Ctrl+C: {e}");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    Ok(())
}
