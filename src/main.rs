//! Parcel rate engine HTTP server.
//!
//! Reads service settings from the YAML file named by
//! `PARCEL_RATE_SETTINGS` (default `config/engine.yaml`), loads the rule
//! file and serves the quote and rule management API.

use std::error::Error;

use parcel_rate_engine::api::{AppState, create_router};
use parcel_rate_engine::config::{EngineSettings, RuleStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings_path = EngineSettings::path_from_env();
    let settings = EngineSettings::load_or_default(&settings_path)?;
    info!(path = %settings_path.display(), "Loaded settings");

    let store = RuleStore::new(&settings.rules.path);
    let rules = store.load_active(settings.rules.normalize_on_load)?;

    let state = AppState::with_store(rules, store, settings.rules.normalize_on_load);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server.bind_address).await?;
    info!(address = %settings.server.bind_address, "parcel-rate-engine listening");

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
