use chrono::Utc;
use sqlx::SqliteConnection;

use crate::{
    pkg::internal::{adaptors::inquiries::spec::InquiryEntry, inquiry::InquiryInput},
    prelude::Result,
};

pub struct InquiryMutator<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> InquiryMutator<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        InquiryMutator { pool }
    }

    pub async fn create(&mut self, input: &InquiryInput, quantity: i64) -> Result<InquiryEntry> {
        let row = sqlx::query_as::<_, InquiryEntry>(
            r#"
            INSERT INTO cpu_inquiries (full_name, email, phone, cpu_model, quantity, ram,
                                       storage, message, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING id, full_name, email, phone, cpu_model, quantity, ram, storage,
                      message, created_at
            "#,
        )
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.cpu_model)
        .bind(quantity)
        .bind(&input.ram)
        .bind(&input.storage)
        .bind(&input.message)
        .bind(Utc::now())
        .fetch_one(&mut *self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cpu_inquiries WHERE id = ?1")
            .bind(id)
            .execute(&mut *self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
