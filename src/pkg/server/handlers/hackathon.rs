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
            auth::Admin,
            hackathon::{self, Registration, RegistrationInput},
        },
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn register(
    State(state): State<AppState>,
    payload: core::result::Result<Json<RegistrationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(input) = payload?;
    let registration = hackathon::register(&state, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Hackathon registration successful",
            "team_id": registration.team.id,
        })),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
) -> Result<Json<Vec<Registration>>> {
    Ok(Json(hackathon::list(&state).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    hackathon::delete(&state, id).await?;
    tracing::info!("{} deleted hackathon team {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}
