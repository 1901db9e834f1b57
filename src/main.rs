mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod store;
mod config;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::routes::fleet_routes::app_router;
use crate::shared_state::AppState;
use crate::store::{InMemoryPlantStore, JsonFilePlantStore, PlantStore};

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Structured logging
    init_logging(&config);

    // 3. Plant store
    let store: Arc<dyn PlantStore> = match &config.store.path {
        Some(path) => match JsonFilePlantStore::open(path) {
            Ok(s) => {
                info!(path = %s.path().display(), "Using file-backed plant store");
                Arc::new(s)
            }
            Err(e) => {
                error!(path = %path, error = %e, "Failed to open plant store");
                std::process::exit(1);
            }
        },
        None => {
            info!("Using in-memory plant store");
            Arc::new(InMemoryPlantStore::new())
        }
    };

    // 4. Start Axum HTTP server
    let state = AppState::new(store);
    let app = app_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!(%addr, "API server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr).serve(app.into_make_service()).await {
        error!(error = %e, "HTTP server error");
        std::process::exit(1);
    }
}

fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("solar_fleet_sim=info,tower_http=info"));

    if config.log_json {
        fmt().json().with_env_filter(env_filter).with_target(true).init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
