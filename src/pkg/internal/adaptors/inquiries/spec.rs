use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InquiryEntry {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub cpu_model: String,
    pub quantity: i64,
    pub ram: String,
    pub storage: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
