//! Item API handlers
//!
//! Maps the REST surface onto the service layer. Create and modify accept
//! multipart form data with a JSON `item` part and a binary `file` part;
//! everything else is plain JSON or raw bytes.

use crate::error::AppError;
use crate::models::{Item, ItemIdResponse, ItemPayload};
use crate::services::PictureStore;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Query parameters for the picture display endpoint
#[derive(Deserialize)]
pub struct DisplayParams {
    /// Identifier of the item whose picture to serve
    #[serde(rename = "itemId")]
    pub item_id: i64,
}

/// One uploaded file part: original filename plus raw bytes
struct UploadedFile {
    original_name: String,
    bytes: Vec<u8>,
}

/// Decoded multipart request: the JSON `item` part and the optional `file` part
struct ItemUpload {
    payload: ItemPayload,
    file: Option<UploadedFile>,
}

/// Pull the `item` and `file` parts out of a multipart request.
///
/// The `item` part must be present and hold valid JSON; whether `file` is
/// required depends on the endpoint, so its absence is left to the caller.
async fn read_item_upload(mut multipart: Multipart) -> Result<ItemUpload, AppError> {
    let mut payload: Option<ItemPayload> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "item" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidRequest(format!("Failed to read item part: {}", e))
                })?;
                payload = Some(serde_json::from_str(&text).map_err(|e| {
                    AppError::InvalidRequest(format!("Malformed item payload: {}", e))
                })?);
            }
            "file" => {
                let original_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::InvalidRequest("File part has no filename".into()))?;
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::InvalidRequest(format!("Failed to read file part: {}", e))
                })?;
                file = Some(UploadedFile {
                    original_name,
                    bytes: bytes.to_vec(),
                });
            }
            other => {
                tracing::warn!("Unknown multipart field: {}", other);
            }
        }
    }

    let payload =
        payload.ok_or_else(|| AppError::InvalidRequest("Missing item part".to_string()))?;

    Ok(ItemUpload { payload, file })
}

/// GET /items - List all items, newest identifier first
pub async fn list_items(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Item>>, AppError> {
    let items = state.items.list().await?;
    Ok(Json(items))
}

/// GET /items/:item_id - Read a single item
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
) -> Result<Json<Item>, AppError> {
    let item = state.items.read(item_id).await?;
    Ok(Json(item))
}

/// POST /items - Register a new item with its picture
///
/// Stores the picture first, then persists the item pointing at the stored
/// filename; the response carries only the generated identifier.
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ItemIdResponse>, AppError> {
    let upload = read_item_upload(multipart).await?;
    let file = upload
        .file
        .ok_or_else(|| AppError::InvalidRequest("Missing file part".to_string()))?;

    let stored_name = state
        .pictures
        .store(&file.original_name, &file.bytes)
        .await?;

    info!(
        original_name = %file.original_name,
        stored_name = %stored_name,
        size = file.bytes.len(),
        "Stored uploaded picture"
    );

    let payload = upload.payload;
    let item_id = state
        .items
        .register(
            &payload.item_name,
            &payload.description,
            payload.price,
            Some(&stored_name),
        )
        .await?;

    info!(item_id, "Registered item");

    Ok(Json(ItemIdResponse { item_id }))
}

/// PUT /items - Modify an existing item, optionally replacing its picture
///
/// Without a `file` part the previous stored filename is carried forward.
/// A superseded picture file is left on disk; orphans are an accepted
/// trade-off of the contract, not cleaned up here.
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ItemIdResponse>, AppError> {
    let upload = read_item_upload(multipart).await?;
    let payload = upload.payload;

    let item_id = payload
        .item_id
        .ok_or_else(|| AppError::InvalidRequest("Missing itemId in item payload".to_string()))?;

    let picture_url = match upload.file {
        Some(file) => {
            let stored_name = state
                .pictures
                .store(&file.original_name, &file.bytes)
                .await?;
            info!(
                item_id,
                stored_name = %stored_name,
                size = file.bytes.len(),
                "Stored replacement picture"
            );
            Some(stored_name)
        }
        None => {
            // No new picture: keep whatever the item already references
            state.items.read(item_id).await?.picture_url
        }
    };

    state
        .items
        .modify(
            item_id,
            &payload.item_name,
            &payload.description,
            payload.price,
            picture_url.as_deref(),
        )
        .await?;

    info!(item_id, "Modified item");

    Ok(Json(ItemIdResponse { item_id }))
}

/// DELETE /items/:item_id - Remove an item
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.items.remove(item_id).await?;
    info!(item_id, "Removed item");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /items/display?itemId= - Serve an item's picture bytes
///
/// Content type is inferred from the stored filename's extension, falling
/// back to octet-stream. Lookup and read failures surface as 400.
pub async fn display_picture(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DisplayParams>,
) -> Result<Response, AppError> {
    // The display contract is 400 for every lookup failure, including a
    // missing item, so downgrade the 404 here.
    let file_name = state
        .items
        .picture_filename(params.item_id)
        .await
        .map_err(|e| match e {
            AppError::ItemNotFound(id) => AppError::PictureNotFound(format!("item {}", id)),
            other => other,
        })?;
    let bytes = state.pictures.load(&file_name).await?;

    let content_type =
        PictureStore::media_type_for(&file_name).unwrap_or("application/octet-stream");

    info!(
        item_id = params.item_id,
        file_name = %file_name,
        content_type,
        size = bytes.len(),
        "Serving picture"
    );

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
