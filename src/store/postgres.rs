//! PostgreSQL-backed store. Each operation runs in its own transaction;
//! dropping the transaction on an error path rolls it back.

use super::AdvertisementStore;
use crate::error::AppError;
use crate::model::{Advertisement, AdvertisementPatch, NewAdvertisement};
use crate::sql::{self, BindValue, QueryBuf};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

#[derive(Clone)]
pub struct PgAdvertisementStore {
    pool: PgPool,
}

impl PgAdvertisementStore {
    pub fn new(pool: PgPool) -> Self {
        PgAdvertisementStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn bind_params<'q, O>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query_as::<_, O>(&q.sql);
    for p in &q.params {
        query = match p {
            BindValue::Int(n) => query.bind(*n),
            BindValue::Text(s) => query.bind(s.as_str()),
            BindValue::Timestamp(t) => query.bind(*t),
        };
    }
    query
}

#[async_trait]
impl AdvertisementStore for PgAdvertisementStore {
    async fn fetch(&self, id: i64) -> Result<Option<Advertisement>, AppError> {
        let mut tx = self.pool.begin().await?;
        let q = sql::select_by_id(id, false);
        let row = bind_params::<Advertisement>(&q).fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn insert(&self, ad: NewAdvertisement) -> Result<Advertisement, AppError> {
        let mut tx = self.pool.begin().await?;
        let q = sql::insert(&ad, Utc::now());
        let row = bind_params::<Advertisement>(&q).fetch_one(&mut *tx).await?;
        tx.commit().await?;
        tracing::info!(id = row.id, "advertisement created");
        Ok(row)
    }

    async fn update(&self, id: i64, patch: AdvertisementPatch) -> Result<Option<Advertisement>, AppError> {
        let mut tx = self.pool.begin().await?;
        let lookup = sql::select_by_id(id, true);
        if bind_params::<Advertisement>(&lookup)
            .fetch_optional(&mut *tx)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        let q = sql::update(id, &patch);
        let row = bind_params::<Advertisement>(&q).fetch_one(&mut *tx).await?;
        tx.commit().await?;
        Ok(Some(row))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let q = sql::delete(id);
        let deleted = bind_params::<(i64,)>(&q).fetch_optional(&mut *tx).await?;
        tx.commit().await?;
        if deleted.is_some() {
            tracing::info!(id, "advertisement deleted");
        }
        Ok(deleted.is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
