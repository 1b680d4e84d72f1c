use chrono::{DateTime, Duration, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::{
    pkg::server::state::AppState,
    prelude::{AppError, Result},
};

#[derive(FromRow, Debug, Clone)]
pub struct Admin {
    pub admin_id: String,
    pub name: String,
}

#[derive(FromRow, Debug)]
pub struct AdminToken {
    pub token: String,
    pub admin_id: String,
    pub expiry: DateTime<Utc>,
}

impl Admin {
    /// Creates the administrator, or returns the existing one with that name.
    pub async fn create(state: &AppState, name: &str) -> Result<Self> {
        let admin = sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (admin_id, name, created_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (name) DO UPDATE
            SET name = excluded.name
            RETURNING admin_id, name
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&*state.db_pool)
        .await?;
        Ok(admin)
    }

    pub async fn issue_token(&self, state: &AppState) -> Result<AdminToken> {
        let expiry = Utc::now() + Duration::hours(state.settings.admin_token_ttl_hours);
        let token = sqlx::query_as::<_, AdminToken>(
            r#"
            INSERT INTO admin_tokens (token, admin_id, expiry)
            VALUES (?1, ?2, ?3)
            RETURNING token, admin_id, expiry
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&self.admin_id)
        .bind(expiry)
        .fetch_one(&*state.db_pool)
        .await?;
        tracing::debug!("issued token for admin {}, valid until {}", &self.name, expiry);
        Ok(token)
    }
}

impl AdminToken {
    pub async fn check_token_validity(state: &AppState, token_str: &str) -> Result<Admin> {
        let pool = &*state.db_pool;
        let token_str = token_str
            .parse::<Uuid>()
            .map_err(|_| AppError::Unauthorized)?
            .to_string();

        let token = sqlx::query_as::<_, AdminToken>(
            "SELECT token, admin_id, expiry FROM admin_tokens WHERE token = ?1",
        )
        .bind(&token_str)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;
        if token.expiry <= Utc::now() {
            tracing::info!("rejected expired token for admin {}", &token.admin_id);
            return Err(AppError::Unauthorized);
        }
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT admin_id, name FROM admins WHERE admin_id = ?1",
        )
        .bind(&token.admin_id)
        .fetch_one(pool)
        .await?;
        Ok(admin)
    }
}
