//! Advert service: CRUD REST backend for advertisements on PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{ServerConfig, StorageBackend};
pub use error::{AppError, ConfigError};
pub use model::{Advertisement, AdvertisementPatch, NewAdvertisement};
pub use routes::{advertisement_routes, app, common_routes};
pub use service::{AdvertisementService, RequestValidator};
pub use state::AppState;
pub use store::{
    ensure_advertisements_table, ensure_database_exists, AdvertisementStore, MemoryAdvertisementStore,
    PgAdvertisementStore,
};
pub use telemetry::init_tracing;
