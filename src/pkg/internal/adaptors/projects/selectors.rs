use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::projects::spec::ProjectEntry, prelude::Result};

pub struct ProjectSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ProjectSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ProjectSelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<ProjectEntry>> {
        let rows = sqlx::query_as::<_, ProjectEntry>(
            "SELECT id, title, description, link, created_at
             FROM projects ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }
}
