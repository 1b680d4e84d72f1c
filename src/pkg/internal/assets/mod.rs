use std::path::Path;

use serde::Serialize;

use crate::prelude::{AppError, Result};

pub mod cloudinary;

/// A file received from a client, not yet stored anywhere.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Where the remote asset host put an upload. `path` is what the database
/// keeps; the public id used for deletion is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAsset {
    pub path: String,
    pub url: String,
}

#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, folder: &str, upload: Upload) -> Result<StoredAsset>;
    async fn destroy(&self, public_id: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Pdf,
}

impl AttachmentKind {
    fn extensions(&self) -> &'static [&'static str] {
        match self {
            AttachmentKind::Image => &["jpg", "jpeg", "png", "webp", "gif"],
            AttachmentKind::Pdf => &["pdf"],
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "Upload a valid image (jpg, jpeg, png, webp or gif).",
            AttachmentKind::Pdf => "Upload a valid PDF file.",
        }
    }
}

/// Checks the file extension and size of an upload before it is sent to the
/// asset host. Errors are reported against `field`.
pub fn check_upload(upload: &Upload, kind: AttachmentKind, field: &str, max_bytes: usize) -> Result<()> {
    let extension = Path::new(&upload.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !kind.extensions().contains(&extension.as_str()) {
        return Err(AppError::field(field, kind.describe()));
    }
    if upload.data.is_empty() {
        return Err(AppError::field(field, "The submitted file is empty."));
    }
    if upload.data.len() > max_bytes {
        return Err(AppError::field(
            field,
            format!("File too large. Maximum size is {} bytes.", max_bytes),
        ));
    }
    Ok(())
}

/// Strips the extension from a stored path: `media/gallery/a.b.jpg` becomes
/// `media/gallery/a.b`. Returns `None` for an empty path.
pub fn public_id(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    let file_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => Some(&path[..file_start + dot]),
        _ => Some(path),
    }
}

/// Deletes a previously stored asset. Failures are logged, never returned.
pub async fn release(store: &dyn AssetStore, path: Option<&str>) {
    let Some(pid) = path.and_then(public_id) else {
        return;
    };
    match store.destroy(pid).await {
        Ok(()) => tracing::info!("released remote asset {}", pid),
        Err(e) => tracing::warn!("failed to release remote asset {}: {}", pid, e),
    }
}

/// Releases `old` when an update swapped it for a different attachment.
pub async fn release_replaced(store: &dyn AssetStore, old: &str, new: &str) {
    if old != new {
        release(store, Some(old)).await;
    }
}
