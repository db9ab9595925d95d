//! The four advertisement operations over an injected store.

use crate::error::AppError;
use crate::model::{Advertisement, AdvertisementPatch, NewAdvertisement};
use crate::store::AdvertisementStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdvertisementService {
    store: Arc<dyn AdvertisementStore>,
}

impl AdvertisementService {
    pub fn new(store: Arc<dyn AdvertisementStore>) -> Self {
        AdvertisementService { store }
    }

    pub fn store(&self) -> &Arc<dyn AdvertisementStore> {
        &self.store
    }

    pub async fn retrieve(&self, id: i64) -> Result<Advertisement, AppError> {
        self.store
            .fetch(id)
            .await?
            .ok_or_else(AppError::advertisement_not_found)
    }

    /// Returns the id assigned by the store.
    pub async fn create(&self, ad: NewAdvertisement) -> Result<i64, AppError> {
        Ok(self.store.insert(ad).await?.id)
    }

    pub async fn partial_update(&self, id: i64, patch: AdvertisementPatch) -> Result<Advertisement, AppError> {
        self.store
            .update(id, patch)
            .await?
            .ok_or_else(AppError::advertisement_not_found)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.store.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::advertisement_not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryAdvertisementStore;

    fn service() -> AdvertisementService {
        AdvertisementService::new(Arc::new(MemoryAdvertisementStore::new()))
    }

    fn ad() -> NewAdvertisement {
        NewAdvertisement {
            headline: "H".into(),
            description: "D".into(),
            owner: "O".into(),
        }
    }

    #[tokio::test]
    async fn create_then_retrieve() {
        let svc = service();
        let id = svc.create(ad()).await.unwrap();
        assert!(id > 0);
        let row = svc.retrieve(id).await.unwrap();
        assert_eq!((row.headline.as_str(), row.description.as_str(), row.owner.as_str()), ("H", "D", "O"));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let svc = service();
        assert!(matches!(svc.retrieve(999_999).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.delete(999_999).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            svc.partial_update(999_999, AdvertisementPatch::default()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields_and_timestamp() {
        let svc = service();
        let id = svc.create(ad()).await.unwrap();
        let before = svc.retrieve(id).await.unwrap();
        let patch = AdvertisementPatch {
            headline: Some("New".into()),
            ..Default::default()
        };
        let after = svc.partial_update(id, patch).await.unwrap();
        assert_eq!(after.headline, "New");
        assert_eq!(after.description, before.description);
        assert_eq!(after.owner, before.owner);
        assert_eq!(after.created_at, before.created_at);
    }
}
