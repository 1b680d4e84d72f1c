use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::applications::spec::ApplicationEntry, prelude::Result};

pub struct ApplicationSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ApplicationSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ApplicationSelector { pool }
    }

    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<ApplicationEntry>> {
        let row = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            SELECT a.id, a.job_id, j.title AS job_title, a.full_name, a.email, a.phone,
                   a.college, a.cgpa, a.year_of_passing, a.experience, a.skills,
                   a.resume_path, a.resume_url, a.applied_at
            FROM career_applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_all(&mut self) -> Result<Vec<ApplicationEntry>> {
        let rows = sqlx::query_as::<_, ApplicationEntry>(
            r#"
            SELECT a.id, a.job_id, j.title AS job_title, a.full_name, a.email, a.phone,
                   a.college, a.cgpa, a.year_of_passing, a.experience, a.skills,
                   a.resume_path, a.resume_url, a.applied_at
            FROM career_applications a
            JOIN jobs j ON j.id = a.job_id
            ORDER BY a.applied_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    /// Stored resume paths of every application to one job.
    pub async fn resume_paths_for_job(&mut self, job_id: i64) -> Result<Vec<String>> {
        let paths = sqlx::query_scalar::<_, String>(
            "SELECT resume_path FROM career_applications
             WHERE job_id = ?1 AND resume_path IS NOT NULL",
        )
        .bind(job_id)
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(paths)
    }

    pub async fn count(&mut self) -> Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM career_applications")
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(n)
    }
}
