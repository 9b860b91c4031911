//! Masking proxy - entry point.

use masking_proxy::{
    api::{create_router_with_rate_limit, AppState, RateLimitState},
    config::Config,
    notify::Notifier,
};
use messagebird_client::MessageBirdClient;
use ride_store::{Records, Store};
use secrecy::ExposeSecret;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting masking proxy");

    // Initialize storage
    let store = if config.records.persist {
        Store::file(config.records.path.clone())
    } else {
        info!("Persistence disabled, keeping records in memory");
        Store::memory()
    };

    // Load existing records
    let records = match store.load().await {
        Ok(r) => {
            info!(
                customers = r.customers().len(),
                drivers = r.drivers().len(),
                proxy_numbers = r.proxy_numbers().len(),
                rides = r.rides().len(),
                "Loaded records"
            );
            r
        }
        Err(e) => {
            error!("Failed to load records: {}", e);
            info!("Starting with empty records");
            Records::new()
        }
    };

    if config.messagebird.access_key.expose_secret().is_empty() {
        warn!("MessageBird access key is not set; outbound messages will fail");
    }

    // Initialize the carrier client
    let notifier: Arc<dyn Notifier> = match MessageBirdClient::new(
        config.messagebird.api_url.clone(),
        config.messagebird.access_key.clone(),
        config.messagebird.timeout,
    ) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to create MessageBird client: {}", e);
            std::process::exit(1);
        }
    };

    // Create application state
    let state = AppState::new(records, store, notifier);

    // Create rate limiter from config
    let rate_limit = RateLimitState::new(config.rate_limit.create_ride_per_minute);

    // Create router
    let app = create_router_with_rate_limit(state, rate_limit);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
