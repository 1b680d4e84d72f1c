use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    pkg::internal::{assets::StoredAsset, careers::ApplicationForm},
    prelude::Result,
};

pub struct ApplicationMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ApplicationMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ApplicationMutator { pool }
    }

    /// Inserts the application and returns its id.
    pub async fn create(
        &mut self,
        job_id: i64,
        form: &ApplicationForm,
        resume: Option<&StoredAsset>,
    ) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO career_applications (job_id, full_name, email, phone, college, cgpa,
                                             year_of_passing, experience, skills,
                                             resume_path, resume_url, applied_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            RETURNING id
            "#,
        )
        .bind(job_id)
        .bind(&form.full_name)
        .bind(&form.email)
        .bind(&form.phone)
        .bind(&form.college)
        .bind(&form.cgpa)
        .bind(&form.year_of_passing)
        .bind(&form.experience)
        .bind(&form.skills)
        .bind(resume.map(|r| r.path.as_str()))
        .bind(resume.map(|r| r.url.as_str()))
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(id)
    }

    /// Deletes the application. The outer option is `None` when no row
    /// matched, the inner one carries the stored resume path if any.
    pub async fn delete(&mut self, id: i64) -> Result<Option<Option<String>>> {
        let resume = sqlx::query_scalar::<_, Option<String>>(
            "DELETE FROM career_applications WHERE id = ?1 RETURNING resume_path",
        )
        .bind(id)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(resume)
    }
}
