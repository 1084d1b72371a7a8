//! Item database operations
//!
//! Wraps the SQLite connection pool and owns every SQL statement in the
//! application. The schema is applied at startup from `migrations/`.

use crate::error::AppError;
use crate::models::Item;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Database connection pool for item operations
#[derive(Clone)]
pub struct ItemDb {
    pool: SqlitePool,
}

impl ItemDb {
    /// Initialize the database connection pool and apply the schema.
    ///
    /// # Arguments
    /// * `database_url` - SQLite location, with or without the `sqlite:` scheme
    pub async fn new(database_url: &str) -> Result<Self, AppError> {
        let path = database_url.trim_start_matches("sqlite:");

        // Ensure parent directory exists for file-backed databases
        if path != ":memory:" {
            if let Some(parent) = PathBuf::from(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let connection_string = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite:{}", database_url)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database url: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", database_url);

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Apply the schema migration shipped with the binary.
    async fn run_migrations(&self) -> Result<(), AppError> {
        let migration_sql = include_str!("../migrations/001_create_items.sql");

        // Strip comment lines, then execute statement by statement
        let cleaned: String = migration_sql
            .lines()
            .map(|line| match line.find("--") {
                Some(pos) => &line[..pos],
                None => line,
            })
            .collect::<Vec<_>>()
            .join("\n");

        for statement in cleaned.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        debug!("Database schema is up to date");
        Ok(())
    }

    /// Get all items, newest generated identifier first.
    pub async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT item_id, item_name, description, price, picture_url
             FROM item ORDER BY item_id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Get a single item by identifier, `None` if no row matches.
    pub async fn find_by_id(&self, item_id: i64) -> Result<Option<Item>, AppError> {
        let item = sqlx::query_as::<_, Item>(
            "SELECT item_id, item_name, description, price, picture_url
             FROM item WHERE item_id = ?",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Insert a new item and return its generated identifier.
    pub async fn insert(
        &self,
        item_name: &str,
        description: &str,
        price: i64,
        picture_url: Option<&str>,
    ) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO item (item_name, description, price, picture_url)
             VALUES (?, ?, ?, ?)",
        )
        .bind(item_name)
        .bind(description)
        .bind(price)
        .bind(picture_url)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Replace the mutable fields of an existing item.
    ///
    /// Runs the existence check and the update inside one transaction so the
    /// read-then-write is atomic under concurrent modification. Fails with
    /// `ItemNotFound` if no row matches `item_id`.
    pub async fn update(
        &self,
        item_id: i64,
        item_name: &str,
        description: &str,
        price: i64,
        picture_url: Option<&str>,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Item>(
            "SELECT item_id, item_name, description, price, picture_url
             FROM item WHERE item_id = ?",
        )
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_none() {
            return Err(AppError::ItemNotFound(item_id));
        }

        sqlx::query(
            "UPDATE item SET item_name = ?, description = ?, price = ?, picture_url = ?
             WHERE item_id = ?",
        )
        .bind(item_name)
        .bind(description)
        .bind(price)
        .bind(picture_url)
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Delete an item by identifier; returns the number of rows removed.
    pub async fn delete(&self, item_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM item WHERE item_id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> ItemDb {
        ItemDb::new("sqlite::memory:")
            .await
            .expect("Failed to create in-memory db")
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let db = test_db().await;

        let first = db.insert("chair", "wooden chair", 40, None).await.unwrap();
        let second = db.insert("table", "oak table", 120, None).await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_find_all_orders_by_id_descending() {
        let db = test_db().await;

        for name in ["a", "b", "c"] {
            db.insert(name, "desc", 1, None).await.unwrap();
        }

        let items = db.find_all().await.unwrap();
        assert_eq!(items.len(), 3);
        assert!(items[0].item_id > items[1].item_id);
        assert!(items[1].item_id > items[2].item_id);
        assert_eq!(items[0].item_name, "c");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_returns_none() {
        let db = test_db().await;
        assert!(db.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let db = test_db().await;
        let id = db.insert("chair", "wooden chair", 40, None).await.unwrap();

        db.update(id, "stool", "bar stool", 55, Some("pic.png"))
            .await
            .unwrap();

        let item = db.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(item.item_name, "stool");
        assert_eq!(item.price, 55);
        assert_eq!(item.picture_url.as_deref(), Some("pic.png"));
    }

    #[tokio::test]
    async fn test_update_missing_item_fails() {
        let db = test_db().await;
        let result = db.update(12345, "x", "y", 1, None).await;
        assert!(matches!(result, Err(AppError::ItemNotFound(12345))));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = test_db().await;
        let id = db.insert("chair", "wooden chair", 40, None).await.unwrap();

        assert_eq!(db.delete(id).await.unwrap(), 1);
        assert_eq!(db.delete(id).await.unwrap(), 0);
    }
}
