use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::contacts::spec::ContactEntry, prelude::Result};

pub struct ContactSelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ContactSelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ContactSelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<ContactEntry>> {
        let rows = sqlx::query_as::<_, ContactEntry>(
            "SELECT id, name, email, phone, subject, message, created_at
             FROM contact_messages ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&mut self) -> Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(n)
    }
}
