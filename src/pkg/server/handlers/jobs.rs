use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::spec::JobEntry,
            auth::Admin,
            careers::{self, JobInput},
        },
        server::state::AppState,
    },
    prelude::Result,
};

/// Jobs currently open for applications.
pub async fn open(State(state): State<AppState>) -> Result<Json<Vec<JobEntry>>> {
    Ok(Json(careers::open_jobs(&state).await?))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
) -> Result<Json<Vec<JobEntry>>> {
    Ok(Json(careers::list_jobs(&state).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    payload: core::result::Result<Json<JobInput>, JsonRejection>,
) -> Result<(StatusCode, Json<JobEntry>)> {
    let Json(input) = payload?;
    let job = careers::create_job(&state, &input).await?;
    tracing::info!("{} created job {}", &admin.name, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
    payload: core::result::Result<Json<JobInput>, JsonRejection>,
) -> Result<Json<JobEntry>> {
    let Json(input) = payload?;
    Ok(Json(careers::update_job(&state, id, &input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    careers::delete_job(&state, id).await?;
    tracing::info!("{} deleted job {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}
