use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::{
    pkg::{
        internal::{
            adaptors::projects::spec::ProjectEntry,
            auth::Admin,
            catalog::{self, ProjectInput},
        },
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProjectEntry>>> {
    Ok(Json(catalog::list(&state).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    payload: core::result::Result<Json<ProjectInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectEntry>)> {
    let Json(input) = payload?;
    let project = catalog::create(&state, &input).await?;
    tracing::info!("{} created project {}", &admin.name, project.id);
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
    payload: core::result::Result<Json<ProjectInput>, JsonRejection>,
) -> Result<Json<ProjectEntry>> {
    let Json(input) = payload?;
    Ok(Json(catalog::update(&state, id, &input).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    catalog::delete(&state, id).await?;
    tracing::info!("{} deleted project {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}
