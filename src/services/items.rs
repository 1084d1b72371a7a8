//! Item service
//!
//! Business logic between the HTTP handlers and the database layer. Keeps
//! not-found semantics in one place so every endpoint reports them the same way.

use crate::db::ItemDb;
use crate::error::AppError;
use crate::models::Item;

/// Service for item catalog operations
#[derive(Clone)]
pub struct ItemService {
    db: ItemDb,
}

impl ItemService {
    /// Create a service backed by the given database.
    pub fn new(db: ItemDb) -> Self {
        Self { db }
    }

    /// List all items, newest identifier first.
    pub async fn list(&self) -> Result<Vec<Item>, AppError> {
        self.db.find_all().await
    }

    /// Persist a new item and return its generated identifier.
    pub async fn register(
        &self,
        item_name: &str,
        description: &str,
        price: i64,
        picture_url: Option<&str>,
    ) -> Result<i64, AppError> {
        self.db
            .insert(item_name, description, price, picture_url)
            .await
    }

    /// Read a single item, failing with `ItemNotFound` if absent.
    pub async fn read(&self, item_id: i64) -> Result<Item, AppError> {
        self.db
            .find_by_id(item_id)
            .await?
            .ok_or(AppError::ItemNotFound(item_id))
    }

    /// Overwrite the mutable fields of an existing item.
    ///
    /// The caller supplies the final `picture_url`; carrying a previous
    /// picture forward when no new file was uploaded is the API layer's job.
    pub async fn modify(
        &self,
        item_id: i64,
        item_name: &str,
        description: &str,
        price: i64,
        picture_url: Option<&str>,
    ) -> Result<(), AppError> {
        self.db
            .update(item_id, item_name, description, price, picture_url)
            .await
    }

    /// Delete an item, failing with `ItemNotFound` if no row matched.
    pub async fn remove(&self, item_id: i64) -> Result<(), AppError> {
        let removed = self.db.delete(item_id).await?;
        if removed == 0 {
            return Err(AppError::ItemNotFound(item_id));
        }
        Ok(())
    }

    /// Get the stored picture filename for an item.
    ///
    /// Fails with `ItemNotFound` if the item is absent and `PictureNotFound`
    /// if the item exists but has no picture.
    pub async fn picture_filename(&self, item_id: i64) -> Result<String, AppError> {
        let item = self.read(item_id).await?;
        item.picture_url
            .ok_or_else(|| AppError::PictureNotFound(format!("item {}", item_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_service() -> ItemService {
        let db = ItemDb::new("sqlite::memory:")
            .await
            .expect("Failed to create in-memory db");
        ItemService::new(db)
    }

    #[tokio::test]
    async fn test_register_then_read() {
        let service = test_service().await;

        let id = service
            .register("lamp", "desk lamp", 25, Some("abc_lamp.png"))
            .await
            .unwrap();

        let item = service.read(id).await.unwrap();
        assert_eq!(item.item_id, id);
        assert_eq!(item.item_name, "lamp");
        assert_eq!(item.picture_url.as_deref(), Some("abc_lamp.png"));
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let service = test_service().await;
        let result = service.read(77).await;
        assert!(matches!(result, Err(AppError::ItemNotFound(77))));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let service = test_service().await;

        let first = service.register("a", "first", 1, None).await.unwrap();
        let second = service.register("b", "second", 2, None).await.unwrap();

        let items = service.list().await.unwrap();
        assert_eq!(items[0].item_id, second);
        assert_eq!(items[1].item_id, first);
    }

    #[tokio::test]
    async fn test_modify_overwrites_fields() {
        let service = test_service().await;
        let id = service.register("lamp", "desk lamp", 25, None).await.unwrap();

        service
            .modify(id, "lantern", "camping lantern", 30, Some("new.png"))
            .await
            .unwrap();

        let item = service.read(id).await.unwrap();
        assert_eq!(item.item_name, "lantern");
        assert_eq!(item.price, 30);
        assert_eq!(item.picture_url.as_deref(), Some("new.png"));
    }

    #[tokio::test]
    async fn test_remove_then_read_fails() {
        let service = test_service().await;
        let id = service.register("lamp", "desk lamp", 25, None).await.unwrap();

        service.remove(id).await.unwrap();

        assert!(matches!(
            service.read(id).await,
            Err(AppError::ItemNotFound(_))
        ));
        assert!(matches!(
            service.remove(id).await,
            Err(AppError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_picture_filename_variants() {
        let service = test_service().await;

        let with_pic = service
            .register("lamp", "desk lamp", 25, Some("abc_lamp.png"))
            .await
            .unwrap();
        let without_pic = service.register("bulb", "spare bulb", 3, None).await.unwrap();

        assert_eq!(
            service.picture_filename(with_pic).await.unwrap(),
            "abc_lamp.png"
        );
        assert!(matches!(
            service.picture_filename(without_pic).await,
            Err(AppError::PictureNotFound(_))
        ));
        assert!(matches!(
            service.picture_filename(9999).await,
            Err(AppError::ItemNotFound(_))
        ));
    }
}
