//! Mock pedigree backend
//!
//! Serves the horse and owner REST endpoints from memory, seeded with a small
//! sample stable. Host and port come from `PEDIGREE_MOCK_HOST` /
//! `PEDIGREE_MOCK_PORT` (default 127.0.0.1:8080).

use anyhow::Context;
use pedigree::mock_backend::{MockBackend, MockServerConfig, MockStore};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pedigree=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    let config = MockServerConfig::from_env().context("Invalid mock server configuration")?;
    let store = MockStore::with_sample_data();
    info!("Seeded {} sample horses", store.horse_count());

    MockBackend::with_store(config, store)
        .start()
        .await
        .context("Mock backend failed")
}
