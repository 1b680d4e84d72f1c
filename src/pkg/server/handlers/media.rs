//! Gallery images, MOUs and community items. Admin writes are multipart;
//! a file part on update replaces the stored attachment.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};

use super::multipart::MultipartForm;
use crate::{
    pkg::{
        internal::{
            adaptors::media::spec::{CommunityEntry, GalleryEntry, MouEntry},
            auth::Admin,
            media::{self, CommunityForm, GalleryForm, MouForm},
        },
        server::state::AppState,
    },
    prelude::Result,
};

fn gallery_form(body: &mut MultipartForm) -> GalleryForm {
    GalleryForm {
        title: body.text("title"),
    }
}

fn mou_form(body: &mut MultipartForm) -> Result<MouForm> {
    Ok(MouForm {
        title: body.text("title"),
        organization: body.text("organization"),
        is_active: body.flag("is_active", true)?,
    })
}

fn community_form(body: &mut MultipartForm) -> CommunityForm {
    CommunityForm {
        title: body.text("title"),
        description: body.text("description"),
        section: body.text("section"),
    }
}

pub async fn gallery(State(state): State<AppState>) -> Result<Json<Vec<GalleryEntry>>> {
    Ok(Json(media::gallery(&state).await?))
}

pub async fn mous(State(state): State<AppState>) -> Result<Json<Vec<MouEntry>>> {
    Ok(Json(media::active_mous(&state).await?))
}

pub async fn giveback(State(state): State<AppState>) -> Result<Json<Vec<CommunityEntry>>> {
    Ok(Json(media::giveback(&state).await?))
}

// gallery

pub async fn create_gallery(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<GalleryEntry>)> {
    let mut body = MultipartForm::read(multipart).await?;
    let form = gallery_form(&mut body);
    let entry = media::create_gallery(&state, &form, body.file("image")).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_gallery(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<GalleryEntry>> {
    let mut body = MultipartForm::read(multipart).await?;
    let form = gallery_form(&mut body);
    Ok(Json(
        media::update_gallery(&state, id, &form, body.file("image")).await?,
    ))
}

pub async fn delete_gallery(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    media::delete_gallery(&state, id).await?;
    tracing::info!("{} deleted gallery image {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}

// mous

pub async fn list_mous(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
) -> Result<Json<Vec<MouEntry>>> {
    Ok(Json(media::list_mous(&state).await?))
}

pub async fn create_mou(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<MouEntry>)> {
    let mut body = MultipartForm::read(multipart).await?;
    let form = mou_form(&mut body)?;
    let entry = media::create_mou(&state, &form, body.file("pdf")).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_mou(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<MouEntry>> {
    let mut body = MultipartForm::read(multipart).await?;
    let form = mou_form(&mut body)?;
    Ok(Json(media::update_mou(&state, id, &form, body.file("pdf")).await?))
}

pub async fn delete_mou(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    media::delete_mou(&state, id).await?;
    tracing::info!("{} deleted mou {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}

// community

pub async fn list_community(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
) -> Result<Json<Vec<CommunityEntry>>> {
    Ok(Json(media::list_community(&state).await?))
}

pub async fn create_community(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CommunityEntry>)> {
    let mut body = MultipartForm::read(multipart).await?;
    let form = community_form(&mut body);
    let entry = media::create_community(&state, &form, body.file("image")).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_community(
    State(state): State<AppState>,
    Extension(_admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<CommunityEntry>> {
    let mut body = MultipartForm::read(multipart).await?;
    let form = community_form(&mut body);
    Ok(Json(
        media::update_community(&state, id, &form, body.file("image")).await?,
    ))
}

pub async fn delete_community(
    State(state): State<AppState>,
    Extension(admin): Extension<Arc<Admin>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    media::delete_community(&state, id).await?;
    tracing::info!("{} deleted community item {}", &admin.name, id);
    Ok(StatusCode::NO_CONTENT)
}
