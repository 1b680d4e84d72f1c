use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::jobs::spec::JobEntry, prelude::Result};

pub struct JobSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, location, is_active, application_start_date,
                    application_end_date, created_at
             FROM jobs WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, location, is_active, application_start_date,
                    application_end_date, created_at
             FROM jobs ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Active jobs whose application window contains `day`.
    pub async fn get_open_on(&mut self, day: NaiveDate) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, description, location, is_active, application_start_date,
                    application_end_date, created_at
             FROM jobs
             WHERE is_active = 1
               AND application_start_date <= ?1
               AND application_end_date >= ?1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(day)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
