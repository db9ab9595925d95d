//! In-process store. Ids come from a counter that never goes back, so deleted ids are not reissued.

use super::AdvertisementStore;
use crate::error::AppError;
use crate::model::{Advertisement, AdvertisementPatch, NewAdvertisement};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Advertisement>,
}

#[derive(Default)]
pub struct MemoryAdvertisementStore {
    inner: RwLock<Inner>,
}

impl MemoryAdvertisementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AdvertisementStore for MemoryAdvertisementStore {
    async fn fetch(&self, id: i64) -> Result<Option<Advertisement>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, ad: NewAdvertisement) -> Result<Advertisement, AppError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let row = Advertisement {
            id: inner.last_id,
            headline: ad.headline,
            description: ad.description,
            owner: ad.owner,
            created_at: Utc::now(),
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, patch: AdvertisementPatch) -> Result<Option<Advertisement>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.get_mut(&id).map(|row| {
            patch.apply_to(row);
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_ad(headline: &str) -> NewAdvertisement {
        NewAdvertisement {
            headline: headline.into(),
            description: "D".into(),
            owner: "O".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryAdvertisementStore::new();
        let a = store.insert(new_ad("a")).await.unwrap();
        let b = store.insert(new_ad("b")).await.unwrap();
        assert!(store.delete(b.id).await.unwrap());
        let c = store.insert(new_ad("c")).await.unwrap();
        assert!(a.id < b.id && b.id < c.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn update_of_missing_row_changes_nothing() {
        let store = MemoryAdvertisementStore::new();
        let patch = AdvertisementPatch {
            headline: Some("x".into()),
            ..Default::default()
        };
        assert!(store.update(42, patch).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn creation_time_is_taken_per_insert() {
        let store = MemoryAdvertisementStore::new();
        let a = store.insert(new_ad("a")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let b = store.insert(new_ad("b")).await.unwrap();
        assert!(b.created_at > a.created_at);
    }
}
