//! Application state shared across request handlers

use crate::services::{ItemService, PictureStore};

/// State handed to every handler via `axum::extract::State`.
///
/// Both members are internally synchronized (connection pool) or immutable
/// (upload directory), so no lock wraps this struct.
#[derive(Clone)]
pub struct AppState {
    /// Item business logic backed by the SQLite pool
    pub items: ItemService,
    /// Filesystem-backed picture storage
    pub pictures: PictureStore,
}

impl AppState {
    /// Bundle the service layer into shared state.
    pub fn new(items: ItemService, pictures: PictureStore) -> Self {
        Self { items, pictures }
    }
}
