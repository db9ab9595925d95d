//! Advert server: reads configuration from the environment, prepares storage, serves the API.
//!
//! Run from repo root: `cargo run -p advert-server`

use advert_service::{
    app, ensure_advertisements_table, ensure_database_exists, init_tracing, AdvertisementStore, AppState,
    MemoryAdvertisementStore, PgAdvertisementStore, ServerConfig, StorageBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let store: Arc<dyn AdvertisementStore> = match config.storage {
        StorageBackend::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_advertisements_table(&pool).await?;
            Arc::new(PgAdvertisementStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Arc::new(MemoryAdvertisementStore::new())
        }
    };

    let state = AppState::new(store);
    let router = app(state, config.max_body_bytes);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
