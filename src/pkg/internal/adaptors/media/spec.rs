use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GalleryEntry {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing)]
    pub image_path: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MouEntry {
    pub id: i64,
    pub title: String,
    pub organization: String,
    #[serde(skip_serializing)]
    pub pdf_path: String,
    pub pdf_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommunityEntry {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub section: String,
    #[serde(skip_serializing)]
    pub image_path: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}
