use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use super::multipart::MultipartForm;
use crate::{
    pkg::{
        internal::{
            adaptors::applications::spec::ApplicationEntry,
            auth::Admin,
            careers::{self, ApplicationForm},
        },
        server::state::AppState,
    },
    prelude::Result,
};

pub async fn apply(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>)> {
    let mut body = MultipartForm::read(multipart).await?;
    let form = ApplicationForm {
        job: body.optional("job"),
        full_name: body.text("full_name"),
        email: body.text("email"),
        phone: body.text("phone"),
        college: body.text("college"),
        cgpa: body.text("cgpa"),
        year_of_passing: body.text("year_of_passing"),
        experience: body.text("experience"),
        skills: body.text("skills"),
    };
    careers::submit(&state, &form, body.file("resume")).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Application submitted successfully"})),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
) -> Result<Json<Vec<ApplicationEntry>>> {
    Ok(Json(careers::list(&state).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    careers::delete(&state, id).await?;
    tracing::info!("{} deleted application {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}
