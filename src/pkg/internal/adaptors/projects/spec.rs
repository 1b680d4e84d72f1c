use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectEntry {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}
