//! Persistence handle for advertisements, plus table and database bootstrap.

mod memory;
mod postgres;

pub use memory::MemoryAdvertisementStore;
pub use postgres::PgAdvertisementStore;

use crate::error::{AppError, ConfigError};
use crate::model::{Advertisement, AdvertisementPatch, NewAdvertisement};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Storage for advertisements. Every call is one unit of work: it either
/// commits fully or leaves the store unchanged.
#[async_trait]
pub trait AdvertisementStore: Send + Sync + 'static {
    /// Returns `None` if no advertisement has this id.
    async fn fetch(&self, id: i64) -> Result<Option<Advertisement>, AppError>;

    /// Inserts a new row; the store assigns the id and the creation time.
    async fn insert(&self, ad: NewAdvertisement) -> Result<Advertisement, AppError>;

    /// Applies the patch to an existing row. Returns `None` (and changes nothing) if the id is absent.
    async fn update(&self, id: i64, patch: AdvertisementPatch) -> Result<Option<Advertisement>, AppError>;

    /// Returns `true` if the row existed and was removed.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap liveness check of the backing storage.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Create the advertisements table if it does not exist yet.
pub async fn ensure_advertisements_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = crate::sql::create_table();
    tracing::debug!(sql = %ddl, "ensure table");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::InvalidDatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
