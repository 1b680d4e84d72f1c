use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    pkg::internal::{adaptors::contacts::spec::ContactEntry, contact::ContactInput},
    prelude::Result,
};

pub struct ContactMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> ContactMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        ContactMutator { pool }
    }

    pub async fn create(&mut self, input: &ContactInput) -> Result<ContactEntry> {
        let row = sqlx::query_as::<_, ContactEntry>(
            r#"
            INSERT INTO contact_messages (name, email, phone, subject, message, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, name, email, phone, subject, message, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.subject)
        .bind(&input.message)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
