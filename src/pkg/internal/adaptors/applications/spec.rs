use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A stored application joined with the title of the job it targets.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationEntry {
    pub id: i64,
    pub job_id: i64,
    pub job_title: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub cgpa: String,
    pub year_of_passing: String,
    pub experience: String,
    pub skills: String,
    #[serde(skip_serializing)]
    pub resume_path: Option<String>,
    pub resume_url: Option<String>,
    pub applied_at: DateTime<Utc>,
}
