//! Shared application state for all routes. Built once by the process and handed to the router.

use crate::service::AdvertisementService;
use crate::store::AdvertisementStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub advertisements: AdvertisementService,
}

impl AppState {
    pub fn new(store: Arc<dyn AdvertisementStore>) -> Self {
        AppState {
            advertisements: AdvertisementService::new(store),
        }
    }
}
