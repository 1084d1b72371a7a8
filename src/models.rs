//! Item data types
//!
//! Separates the persisted entity (`Item`) from the request schema
//! (`ItemPayload`) decoded out of the multipart `item` part, so wire-format
//! changes never leak into the database layer.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A catalog item as persisted in the `item` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Generated identifier, immutable after insert
    pub item_id: i64,
    /// Short text label
    pub item_name: String,
    /// Free-text description
    pub description: String,
    /// Price in whole currency units
    pub price: i64,
    /// Stored filename of the uploaded picture, `None` until one is uploaded
    pub picture_url: Option<String>,
}

/// Item metadata carried as JSON in the multipart `item` part.
///
/// `item_id` is only meaningful on modify requests; `picture_url` is computed
/// server-side and ignored if a client supplies it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    /// Identifier of the item to modify (absent on create)
    pub item_id: Option<i64>,
    /// Short text label
    pub item_name: String,
    /// Free-text description
    pub description: String,
    /// Price in whole currency units
    pub price: i64,
}

/// Minimal response body for create/modify: just the affected identifier.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemIdResponse {
    /// Identifier of the created or modified item
    pub item_id: i64,
}
