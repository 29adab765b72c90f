use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use facility_server::catalog::{self, FacilityCatalog};
use facility_server::query::FacilityFinder;
use facility_server::routing::{CachedRoutingProvider, MapsClient, MapsConfig, RoutingCacheConfig};
use facility_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Seed data: a file path from the environment, or the bundled default
    let records = match std::env::var("FACILITY_SEED") {
        Ok(path) => catalog::load_records_from_file(&path)
            .unwrap_or_else(|e| panic!("Failed to load seed data from {path}: {e}")),
        Err(_) => catalog::load_records(catalog::DEFAULT_SEED).expect("Bundled seed data is valid"),
    };

    // Catalog construction validates the seed; fail fast before serving
    let catalog = FacilityCatalog::new(records).expect("Failed to build facility catalog");
    tracing::info!(facilities = catalog.len(), "catalog loaded");

    // Routing provider credentials from the environment
    let api_key = std::env::var("MAPS_API_KEY").unwrap_or_else(|_| {
        tracing::warn!("MAPS_API_KEY not set; routing and geocoding will fail");
        String::new()
    });

    let maps_client =
        MapsClient::new(MapsConfig::new(api_key)).expect("Failed to create Maps client");
    let routing = CachedRoutingProvider::new(maps_client, &RoutingCacheConfig::default());

    let finder = FacilityFinder::new(Arc::new(catalog), Arc::new(routing));
    let state = AppState::new(finder);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!(%addr, "facility server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
