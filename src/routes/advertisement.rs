//! Advertisement CRUD routes. Creation lives on the collection path with a trailing slash;
//! the other three operations share the item path.

use crate::handlers::advertisement::{create, delete as delete_handler, read, update};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn advertisement_routes(state: AppState) -> Router {
    Router::new()
        .route("/advertisements/", post(create))
        .route(
            "/advertisements/:id",
            get(read).patch(update).delete(delete_handler),
        )
        .with_state(state)
}
