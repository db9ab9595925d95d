//! AdvertisementService: CRUD operations and request validation.

mod crud;
mod validation;
pub use crud::AdvertisementService;
pub use validation::{FieldError, RequestValidator};
