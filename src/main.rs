use delivery_fee::config::{self, Config};
use delivery_fee::venues::VenueStore;
use delivery_fee::{app, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG wins when set
    let filter = config::log_filter(std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    info!(?config, "Starting delivery fee service");

    let venues = VenueStore::new(
        config.venues_path.clone(),
        config.venue_cache_ttl,
        config.venue_cache_capacity,
    );

    // A bad catalog is logged but does not stop startup; lookups retry the file
    if let Err(e) = venues.warm().await {
        warn!("Venue cache warm-up from {} failed: {}", venues.path().display(), e);
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app(AppState::new(venues))).await?;

    Ok(())
}
