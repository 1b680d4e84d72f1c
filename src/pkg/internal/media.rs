//! Admin managed display records that carry one remote attachment each:
//! gallery images, MOU documents and community items.
//!
//! Replaced or deleted attachments are released from the asset host after
//! the database write commits.

use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::media::{
                mutators::MediaMutator,
                selectors::MediaSelector,
                spec::{CommunityEntry, GalleryEntry, MouEntry},
            },
            assets::{check_upload, release, release_replaced, AttachmentKind, StoredAsset, Upload},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{AppError, Result},
};

pub const GIVEBACK_SECTION: &str = "giveback";

#[derive(Debug, Default, Clone, Validate)]
pub struct GalleryForm {
    #[validate(length(min = 1, max = 200, message = "This field may not be blank."))]
    pub title: String,
}

#[derive(Debug, Default, Clone, Validate)]
pub struct MouForm {
    #[validate(length(min = 1, max = 200, message = "This field may not be blank."))]
    pub title: String,
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub organization: String,
    pub is_active: bool,
}

#[derive(Debug, Default, Clone, Validate)]
pub struct CommunityForm {
    #[validate(length(min = 1, max = 200, message = "This field may not be blank."))]
    pub title: String,
    pub description: String,
    #[validate(length(min = 1, max = 50, message = "This field may not be blank."))]
    pub section: String,
}

struct Slot {
    folder: &'static str,
    field: &'static str,
    kind: AttachmentKind,
}

const GALLERY: Slot = Slot {
    folder: "gallery",
    field: "image",
    kind: AttachmentKind::Image,
};
const MOU: Slot = Slot {
    folder: "mous",
    field: "pdf",
    kind: AttachmentKind::Pdf,
};
const COMMUNITY: Slot = Slot {
    folder: "community",
    field: "image",
    kind: AttachmentKind::Image,
};

impl Slot {
    async fn store(&self, state: &AppState, upload: Option<Upload>) -> Result<Option<StoredAsset>> {
        let Some(upload) = upload else {
            return Ok(None);
        };
        check_upload(&upload, self.kind, self.field, state.settings.max_upload_bytes)?;
        Ok(Some(state.assets.upload(self.folder, upload).await?))
    }

    async fn store_required(&self, state: &AppState, upload: Option<Upload>) -> Result<StoredAsset> {
        self.store(state, upload)
            .await?
            .ok_or_else(|| AppError::field(self.field, "No file was submitted."))
    }
}

/// Releases a fresh upload when the write that should have referenced it
/// failed.
async fn keep_or_release<T>(
    state: &AppState,
    fresh: Option<&StoredAsset>,
    written: Result<T>,
) -> Result<T> {
    if written.is_err() {
        release(&*state.assets, fresh.map(|s| s.path.as_str())).await;
    }
    written
}

// gallery

pub async fn gallery(state: &AppState) -> Result<Vec<GalleryEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    MediaSelector::new(&mut conn).gallery().await
}

pub async fn create_gallery(
    state: &AppState,
    form: &GalleryForm,
    image: Option<Upload>,
) -> Result<GalleryEntry> {
    form.validate()?;
    let stored = GALLERY.store_required(state, image).await?;
    let written = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let entry = MediaMutator::new(&mut tx).create_gallery(form, &stored).await?;
        tx.commit().await?;
        Ok::<_, AppError>(entry)
    }
    .await;
    keep_or_release(state, Some(&stored), written).await
}

pub async fn update_gallery(
    state: &AppState,
    id: i64,
    form: &GalleryForm,
    image: Option<Upload>,
) -> Result<GalleryEntry> {
    form.validate()?;
    let old = {
        let mut conn = state.db_pool.acquire().await?;
        MediaSelector::new(&mut conn)
            .gallery_by_id(id)
            .await?
            .ok_or(AppError::NotFound("gallery image"))?
    };
    let stored = GALLERY.store(state, image).await?;
    let written = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let entry = MediaMutator::new(&mut tx)
            .update_gallery(id, form, stored.as_ref())
            .await?
            .ok_or(AppError::NotFound("gallery image"))?;
        tx.commit().await?;
        Ok::<_, AppError>(entry)
    }
    .await;
    let entry = keep_or_release(state, stored.as_ref(), written).await?;
    release_replaced(&*state.assets, &old.image_path, &entry.image_path).await;
    Ok(entry)
}

pub async fn delete_gallery(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    let path = MediaMutator::new(&mut tx)
        .delete_gallery(id)
        .await?
        .ok_or(AppError::NotFound("gallery image"))?;
    tx.commit().await?;
    release(&*state.assets, Some(path.as_str())).await;
    Ok(())
}

// mous

pub async fn active_mous(state: &AppState) -> Result<Vec<MouEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    MediaSelector::new(&mut conn).mous(true).await
}

pub async fn list_mous(state: &AppState) -> Result<Vec<MouEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    MediaSelector::new(&mut conn).mous(false).await
}

pub async fn create_mou(state: &AppState, form: &MouForm, pdf: Option<Upload>) -> Result<MouEntry> {
    form.validate()?;
    let stored = MOU.store_required(state, pdf).await?;
    let written = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let entry = MediaMutator::new(&mut tx).create_mou(form, &stored).await?;
        tx.commit().await?;
        Ok::<_, AppError>(entry)
    }
    .await;
    keep_or_release(state, Some(&stored), written).await
}

pub async fn update_mou(
    state: &AppState,
    id: i64,
    form: &MouForm,
    pdf: Option<Upload>,
) -> Result<MouEntry> {
    form.validate()?;
    let old = {
        let mut conn = state.db_pool.acquire().await?;
        MediaSelector::new(&mut conn)
            .mou_by_id(id)
            .await?
            .ok_or(AppError::NotFound("mou"))?
    };
    let stored = MOU.store(state, pdf).await?;
    let written = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let entry = MediaMutator::new(&mut tx)
            .update_mou(id, form, stored.as_ref())
            .await?
            .ok_or(AppError::NotFound("mou"))?;
        tx.commit().await?;
        Ok::<_, AppError>(entry)
    }
    .await;
    let entry = keep_or_release(state, stored.as_ref(), written).await?;
    release_replaced(&*state.assets, &old.pdf_path, &entry.pdf_path).await;
    Ok(entry)
}

pub async fn delete_mou(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    let path = MediaMutator::new(&mut tx)
        .delete_mou(id)
        .await?
        .ok_or(AppError::NotFound("mou"))?;
    tx.commit().await?;
    release(&*state.assets, Some(path.as_str())).await;
    Ok(())
}

// community

/// Community items tagged for the giveback page.
pub async fn giveback(state: &AppState) -> Result<Vec<CommunityEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    MediaSelector::new(&mut conn)
        .community(Some(GIVEBACK_SECTION))
        .await
}

pub async fn list_community(state: &AppState) -> Result<Vec<CommunityEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    MediaSelector::new(&mut conn).community(None).await
}

pub async fn create_community(
    state: &AppState,
    form: &CommunityForm,
    image: Option<Upload>,
) -> Result<CommunityEntry> {
    form.validate()?;
    let stored = COMMUNITY.store_required(state, image).await?;
    let written = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let entry = MediaMutator::new(&mut tx)
            .create_community(form, &stored)
            .await?;
        tx.commit().await?;
        Ok::<_, AppError>(entry)
    }
    .await;
    keep_or_release(state, Some(&stored), written).await
}

pub async fn update_community(
    state: &AppState,
    id: i64,
    form: &CommunityForm,
    image: Option<Upload>,
) -> Result<CommunityEntry> {
    form.validate()?;
    let old = {
        let mut conn = state.db_pool.acquire().await?;
        MediaSelector::new(&mut conn)
            .community_by_id(id)
            .await?
            .ok_or(AppError::NotFound("community item"))?
    };
    let stored = COMMUNITY.store(state, image).await?;
    let written = async {
        let mut tx = state.db_pool.begin_txn().await?;
        let entry = MediaMutator::new(&mut tx)
            .update_community(id, form, stored.as_ref())
            .await?
            .ok_or(AppError::NotFound("community item"))?;
        tx.commit().await?;
        Ok::<_, AppError>(entry)
    }
    .await;
    let entry = keep_or_release(state, stored.as_ref(), written).await?;
    release_replaced(&*state.assets, &old.image_path, &entry.image_path).await;
    Ok(entry)
}

pub async fn delete_community(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    let path = MediaMutator::new(&mut tx)
        .delete_community(id)
        .await?
        .ok_or(AppError::NotFound("community item"))?;
    tx.commit().await?;
    release(&*state.assets, Some(path.as_str())).await;
    Ok(())
}
