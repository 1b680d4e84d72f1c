use axum::{extract::State, Json};
use serde_json::{json, Value};
use sqlx::query;

use crate::{pkg::server::state::AppState, prelude::Result};

pub async fn livez() -> Result<Json<Value>> {
    tracing::debug!("service is live");
    Ok(Json(json!({"status": "live"})))
}

/// Ready once the database answers.
pub async fn healthz(State(state): State<AppState>) -> Result<Json<Value>> {
    query("select 1").execute(&*state.db_pool).await?;
    tracing::debug!("service is healthy");
    Ok(Json(json!({"status": "healthy"})))
}
