use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobEntry {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub is_active: bool,
    pub application_start_date: NaiveDate,
    pub application_end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl JobEntry {
    /// Inclusive on both ends of the application window.
    pub fn accepts_applications_on(&self, day: NaiveDate) -> bool {
        self.application_start_date <= day && day <= self.application_end_date
    }
}
