use sqlx::SqliteConnection;

use crate::{
    pkg::internal::adaptors::media::spec::{CommunityEntry, GalleryEntry, MouEntry},
    prelude::Result,
};

pub struct MediaSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> MediaSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        MediaSelector { pool }
    }

    pub async fn gallery_by_id(&mut self, id: i64) -> Result<Option<GalleryEntry>> {
        let row = sqlx::query_as::<_, GalleryEntry>(
            "SELECT id, title, image_path, image_url, created_at FROM gallery_images WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn gallery(&mut self) -> Result<Vec<GalleryEntry>> {
        let rows = sqlx::query_as::<_, GalleryEntry>(
            "SELECT id, title, image_path, image_url, created_at
             FROM gallery_images ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn mou_by_id(&mut self, id: i64) -> Result<Option<MouEntry>> {
        let row = sqlx::query_as::<_, MouEntry>(
            "SELECT id, title, organization, pdf_path, pdf_url, is_active, created_at
             FROM mous WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn mous(&mut self, only_active: bool) -> Result<Vec<MouEntry>> {
        let rows = sqlx::query_as::<_, MouEntry>(
            "SELECT id, title, organization, pdf_path, pdf_url, is_active, created_at
             FROM mous WHERE (?1 = 0 OR is_active = 1)
             ORDER BY created_at DESC, id DESC",
        )
        .bind(only_active)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn community_by_id(&mut self, id: i64) -> Result<Option<CommunityEntry>> {
        let row = sqlx::query_as::<_, CommunityEntry>(
            "SELECT id, title, description, section, image_path, image_url, created_at
             FROM community_items WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// All community items, or only those tagged with `section`.
    pub async fn community(&mut self, section: Option<&str>) -> Result<Vec<CommunityEntry>> {
        let rows = sqlx::query_as::<_, CommunityEntry>(
            "SELECT id, title, description, section, image_path, image_url, created_at
             FROM community_items WHERE (?1 IS NULL OR section = ?1)
             ORDER BY created_at DESC, id DESC",
        )
        .bind(section)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
