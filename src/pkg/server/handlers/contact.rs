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
            adaptors::contacts::spec::ContactEntry,
            auth::Admin,
            contact::{self, ContactInput},
        },
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn create(
    State(state): State<AppState>,
    payload: core::result::Result<Json<ContactInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(input) = payload?;
    contact::submit(&state, &input).await?;
    Ok((StatusCode::CREATED, Json(json!({"message": "Contact saved"}))))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
) -> Result<Json<Vec<ContactEntry>>> {
    Ok(Json(contact::list(&state).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    contact::delete(&state, id).await?;
    tracing::info!("{} deleted contact message {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}
