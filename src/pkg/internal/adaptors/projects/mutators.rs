use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    pkg::internal::{adaptors::projects::spec::ProjectEntry, catalog::ProjectInput},
    prelude::Result,
};

pub struct ProjectMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ProjectMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ProjectMutator { pool }
    }

    pub async fn create(&mut self, input: &ProjectInput) -> Result<ProjectEntry> {
        let row = sqlx::query_as::<_, ProjectEntry>(
            r#"
            INSERT INTO projects (title, description, link, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, title, description, link, created_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.link)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&mut self, id: i64, input: &ProjectInput) -> Result<Option<ProjectEntry>> {
        let row = sqlx::query_as::<_, ProjectEntry>(
            r#"
            UPDATE projects SET title = ?2, description = ?3, link = ?4
            WHERE id = ?1
            RETURNING id, title, description, link, created_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.link)
        .fetch_optional(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
