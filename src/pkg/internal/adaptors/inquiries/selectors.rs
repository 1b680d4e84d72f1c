use sqlx::SqliteConnection;

use crate::{pkg::internal::adaptors::inquiries::spec::InquiryEntry, prelude::Result};

pub struct InquirySelector<'a> {
    pool: &'a mut SqliteConnection,
}

impl<'a> InquirySelector<'a> {
    pub fn new(pool: &'a mut SqliteConnection) -> Self {
        InquirySelector { pool }
    }

    pub async fn get_all(&mut self) -> Result<Vec<InquiryEntry>> {
        let rows = sqlx::query_as::<_, InquiryEntry>(
            "SELECT id, full_name, email, phone, cpu_model, quantity, ram, storage, message, created_at
             FROM cpu_inquiries ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut *self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count(&mut self) -> Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cpu_inquiries")
            .fetch_one(&mut *self.pool)
            .await?;
        Ok(n)
    }
}
