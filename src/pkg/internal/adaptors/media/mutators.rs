use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    pkg::internal::{
        adaptors::media::spec::{CommunityEntry, GalleryEntry, MouEntry},
        assets::StoredAsset,
        media::{CommunityForm, GalleryForm, MouForm},
    },
    prelude::Result,
};

/// Writes for the admin managed display records. Updates take an optional
/// attachment; `None` keeps the stored one.
pub struct MediaMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> MediaMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        MediaMutator { pool }
    }

    pub async fn create_gallery(
        &mut self,
        form: &GalleryForm,
        image: &StoredAsset,
    ) -> Result<GalleryEntry> {
        let row = sqlx::query_as::<_, GalleryEntry>(
            r#"
            INSERT INTO gallery_images (title, image_path, image_url, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, image_path, image_url, created_at
            "#,
        )
        .bind(&form.title)
        .bind(&image.path)
        .bind(&image.url)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_gallery(
        &mut self,
        id: i64,
        form: &GalleryForm,
        image: Option<&StoredAsset>,
    ) -> Result<Option<GalleryEntry>> {
        let row = sqlx::query_as::<_, GalleryEntry>(
            r#"
            UPDATE gallery_images
            SET title = ?2,
                image_path = COALESCE(?3, image_path),
                image_url = COALESCE(?4, image_url)
            WHERE id = ?1
            RETURNING id, title, image_path, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(&form.title)
        .bind(image.map(|i| i.path.as_str()))
        .bind(image.map(|i| i.url.as_str()))
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    /// Returns the stored image path of the deleted row.
    pub async fn delete_gallery(&mut self, id: i64) -> Result<Option<String>> {
        let path = sqlx::query_scalar::<_, String>(
            "DELETE FROM gallery_images WHERE id = ?1 RETURNING image_path",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(path)
    }

    pub async fn create_mou(&mut self, form: &MouForm, pdf: &StoredAsset) -> Result<MouEntry> {
        let row = sqlx::query_as::<_, MouEntry>(
            r#"
            INSERT INTO mous (title, organization, pdf_path, pdf_url, is_active, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, title, organization, pdf_path, pdf_url, is_active, created_at
            "#,
        )
        .bind(&form.title)
        .bind(&form.organization)
        .bind(&pdf.path)
        .bind(&pdf.url)
        .bind(form.is_active)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_mou(
        &mut self,
        id: i64,
        form: &MouForm,
        pdf: Option<&StoredAsset>,
    ) -> Result<Option<MouEntry>> {
        let row = sqlx::query_as::<_, MouEntry>(
            r#"
            UPDATE mous
            SET title = ?2, organization = ?3, is_active = ?4,
                pdf_path = COALESCE(?5, pdf_path),
                pdf_url = COALESCE(?6, pdf_url)
            WHERE id = ?1
            RETURNING id, title, organization, pdf_path, pdf_url, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(&form.title)
        .bind(&form.organization)
        .bind(form.is_active)
        .bind(pdf.map(|p| p.path.as_str()))
        .bind(pdf.map(|p| p.url.as_str()))
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_mou(&mut self, id: i64) -> Result<Option<String>> {
        let path =
            sqlx::query_scalar::<_, String>("DELETE FROM mous WHERE id = ?1 RETURNING pdf_path")
                .bind(id)
                .fetch_optional(&mut *self.pool)
                .await?;
        Ok(path)
    }

    pub async fn create_community(
        &mut self,
        form: &CommunityForm,
        image: &StoredAsset,
    ) -> Result<CommunityEntry> {
        let row = sqlx::query_as::<_, CommunityEntry>(
            r#"
            INSERT INTO community_items (title, description, section, image_path, image_url,
                                         created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, title, description, section, image_path, image_url, created_at
            "#,
        )
        .bind(&form.title)
        .bind(&form.description)
        .bind(&form.section)
        .bind(&image.path)
        .bind(&image.url)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_community(
        &mut self,
        id: i64,
        form: &CommunityForm,
        image: Option<&StoredAsset>,
    ) -> Result<Option<CommunityEntry>> {
        let row = sqlx::query_as::<_, CommunityEntry>(
            r#"
            UPDATE community_items
            SET title = ?2, description = ?3, section = ?4,
                image_path = COALESCE(?5, image_path),
                image_url = COALESCE(?6, image_url)
            WHERE id = ?1
            RETURNING id, title, description, section, image_path, image_url, created_at
            "#,
        )
        .bind(id)
        .bind(&form.title)
        .bind(&form.description)
        .bind(&form.section)
        .bind(image.map(|i| i.path.as_str()))
        .bind(image.map(|i| i.url.as_str()))
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_community(&mut self, id: i64) -> Result<Option<String>> {
        let path = sqlx::query_scalar::<_, String>(
            "DELETE FROM community_items WHERE id = ?1 RETURNING image_path",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(path)
    }
}
