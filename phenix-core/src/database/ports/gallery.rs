use async_trait::async_trait;
use phenix_model::{Category, GalleryEntry, GalleryEntryDraft, GalleryOrder};

use crate::error::Result;

/// Storage for gallery entries. Every lookup is scoped to a category, so an
/// id belonging to the other gallery behaves as missing.
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn list(
        &self,
        category: Category,
        order: GalleryOrder,
    ) -> Result<Vec<GalleryEntry>>;

    async fn find(
        &self,
        id: i32,
        category: Category,
    ) -> Result<Option<GalleryEntry>>;

    async fn create(
        &self,
        category: Category,
        draft: GalleryEntryDraft,
    ) -> Result<GalleryEntry>;

    /// Replaces title, description and images and refreshes `updated_at`.
    /// Returns `None` when no entry matches.
    async fn update(
        &self,
        id: i32,
        category: Category,
        draft: GalleryEntryDraft,
    ) -> Result<Option<GalleryEntry>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32, category: Category) -> Result<bool>;

    async fn count(&self, category: Category) -> Result<i64>;
}
