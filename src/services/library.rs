//! Shared-library service: one lazily-loaded in-memory copy of the media
//! library, synchronous write-through persistence, and dispatch-time index
//! revalidation. All users read and mutate this single instance.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::database::media::MediaStore;
use crate::database::models::{Direction, MediaItem, MediaLibrary};
use crate::error::EngineError;

/// Process-wide handle to the shared library. Cheap to clone.
#[derive(Clone)]
pub struct LibraryService {
    store: Arc<dyn MediaStore>,
    cache: Arc<RwLock<Option<MediaLibrary>>>,
}

impl LibraryService {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// First access pulls the library from the store. A failed load degrades
    /// soft to an empty library; from then on the in-memory copy is the
    /// authoritative one for this process.
    async fn ensure_loaded(&self) {
        if self.cache.read().await.is_some() {
            return;
        }
        let mut cache = self.cache.write().await;
        if cache.is_some() {
            return;
        }
        match self.store.load().await {
            Ok(library) => {
                info!(
                    target = "library.store",
                    checkin = library.checkin.len(),
                    checkout = library.checkout.len(),
                    "media library loaded"
                );
                *cache = Some(library);
            }
            Err(e) => {
                warn!(target = "library.store", error = %e, "load failed; starting with an empty library");
                *cache = Some(MediaLibrary::default());
            }
        }
    }

    /// Full copy of the current library, for list views.
    pub async fn snapshot(&self) -> MediaLibrary {
        self.ensure_loaded().await;
        self.cache.read().await.clone().unwrap_or_default()
    }

    pub async fn len(&self, direction: Direction) -> usize {
        self.ensure_loaded().await;
        self.cache
            .read()
            .await
            .as_ref()
            .map(|l| l.len(direction))
            .unwrap_or(0)
    }

    /// Dispatch-time revalidation: the item at `index` right now, if the
    /// index still fits the list.
    pub async fn resolve(&self, direction: Direction, index: usize) -> Option<MediaItem> {
        self.ensure_loaded().await;
        self.cache
            .read()
            .await
            .as_ref()
            .and_then(|l| l.get(direction, index).cloned())
    }

    /// Appends an item and writes the library through to the store before
    /// reporting the new index. Holding the write guard across the save
    /// keeps mutate-then-persist free of interleavings.
    pub async fn append(&self, direction: Direction, item: MediaItem) -> usize {
        self.ensure_loaded().await;
        let mut cache = self.cache.write().await;
        let library = cache.get_or_insert_with(MediaLibrary::default);
        let index = library.append(direction, item);
        self.write_through(library).await;
        index
    }

    /// Removes the item at `index`, shifting later items down. The removed
    /// item is reported back so the caller can show what actually went away.
    pub async fn remove_at(
        &self,
        direction: Direction,
        index: usize,
    ) -> Result<MediaItem, EngineError> {
        self.ensure_loaded().await;
        let mut cache = self.cache.write().await;
        let library = cache.get_or_insert_with(MediaLibrary::default);
        let removed = library.remove_at(direction, index)?;
        self.write_through(library).await;
        Ok(removed)
    }

    async fn write_through(&self, library: &MediaLibrary) {
        if let Err(e) = self.store.save(library).await {
            warn!(
                target = "library.store",
                error = %e,
                "write-through save failed; in-memory copy stays authoritative"
            );
        }
    }
}
