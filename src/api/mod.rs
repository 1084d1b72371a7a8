//! API module
//!
//! Contains HTTP request handlers for the item catalog endpoints and the
//! router wiring them to shared state.

pub mod items;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

/// Upper bound for multipart bodies (pictures), 10 MB
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the item-catalog routes around shared state.
///
/// Middleware (request ids, tracing, CORS) is layered on top by the binary;
/// tests drive this router directly.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/items",
            get(items::list_items)
                .post(items::create_item)
                .put(items::update_item),
        )
        .route("/items/display", get(items::display_picture))
        .route(
            "/items/:item_id",
            get(items::get_item).delete(items::delete_item),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
