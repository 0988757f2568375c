//! Durable storage for the shared media library.
//!
//! The two lists are persisted as a unit: `save` rewrites both inside one
//! transaction, so a partially-written library can never be observed by a
//! later `load`.

use async_trait::async_trait;
use std::str::FromStr;
use tokio::sync::Mutex;

use super::init::DbPool;
use super::models::{Direction, MediaItem, MediaKind, MediaLibrary};
use crate::error::StoreError;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Fetches both sequences in stored order.
    async fn load(&self) -> Result<MediaLibrary, StoreError>;
    /// Persists both sequences atomically as a unit.
    async fn save(&self, library: &MediaLibrary) -> Result<(), StoreError>;
}

#[derive(sqlx::FromRow)]
struct MediaRow {
    list_name: String,
    kind: String,
    content: String,
    name: String,
}

pub struct PgMediaStore {
    pool: DbPool,
}

impl PgMediaStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaStore for PgMediaStore {
    async fn load(&self) -> Result<MediaLibrary, StoreError> {
        let rows: Vec<MediaRow> = sqlx::query_as(
            "SELECT list_name, kind, content, name FROM media_items ORDER BY list_name, position",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut library = MediaLibrary::default();
        for row in rows {
            let direction = Direction::from_str(&row.list_name)
                .map_err(|_| StoreError::Decode(format!("unknown list name {:?}", row.list_name)))?;
            let kind = MediaKind::from_str(&row.kind)
                .map_err(|_| StoreError::Decode(format!("unknown media kind {:?}", row.kind)))?;
            library.append(direction, MediaItem::new(kind, row.content, row.name));
        }
        Ok(library)
    }

    async fn save(&self, library: &MediaLibrary) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM media_items")
            .execute(&mut *tx)
            .await?;
        for direction in [Direction::CheckIn, Direction::CheckOut] {
            for (position, item) in library.list(direction).iter().enumerate() {
                sqlx::query(
                    "INSERT INTO media_items (list_name, position, kind, content, name) \
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(direction.as_str())
                .bind(position as i32)
                .bind(item.kind.as_str())
                .bind(&item.content)
                .bind(&item.name)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;
        Ok(())
    }
}

/// In-memory store: the degraded no-database mode, and the test double.
#[derive(Default)]
pub struct MemoryMediaStore {
    library: Mutex<MediaLibrary>,
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn load(&self) -> Result<MediaLibrary, StoreError> {
        Ok(self.library.lock().await.clone())
    }

    async fn save(&self, library: &MediaLibrary) -> Result<(), StoreError> {
        *self.library.lock().await = library.clone();
        Ok(())
    }
}
