use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    pkg::{
        internal::{
            adaptors::inquiries::spec::InquiryEntry,
            auth::Admin,
            inquiry::{self, InquiryInput},
        },
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn create(
    State(state): State<AppState>,
    payload: core::result::Result<Json<InquiryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(input) = payload?;
    inquiry::submit(&state, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({"message": "Inquiry submitted"}))))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
) -> Result<Json<Vec<InquiryEntry>>> {
    Ok(Json(inquiry::list(&state).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    inquiry::delete(&state, id).await?;
    tracing::info!("{} deleted cpu inquiry {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}
