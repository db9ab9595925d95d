//! HTTP handlers for advertisement CRUD.

pub mod advertisement;
pub use advertisement::*;
