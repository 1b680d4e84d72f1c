use chrono::Utc;
use sqlx::SqliteConnection;

use crate::pkg::internal::adaptors::jobs::spec::JobEntry;
use crate::pkg::internal::careers::{JobInput, JobSchedule};
use crate::prelude::Result;

pub struct JobMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&mut self, job: &JobInput, schedule: &JobSchedule) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, description, location, is_active,
                              application_start_date, application_end_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING id, title, description, location, is_active, application_start_date,
                      application_end_date, created_at
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(schedule.is_active)
        .bind(schedule.application_start_date)
        .bind(schedule.application_end_date)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(
        &mut self,
        id: i64,
        job: &JobInput,
        schedule: &JobSchedule,
    ) -> Result<Option<JobEntry>> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            UPDATE jobs
            SET title = ?2, description = ?3, location = ?4, is_active = ?5,
                application_start_date = ?6, application_end_date = ?7
            WHERE id = ?1
            RETURNING id, title, description, location, is_active, application_start_date,
                      application_end_date, created_at
            "#,
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(schedule.is_active)
        .bind(schedule.application_start_date)
        .bind(schedule.application_end_date)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
