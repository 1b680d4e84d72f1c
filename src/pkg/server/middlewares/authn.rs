use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    pkg::{internal::auth::AdminToken, server::state::AppState},
    prelude::{AppError, Result},
};

pub const TOKEN_COOKIE: &str = "_Host_token";

/// Bearer header first, then the token cookie.
fn presented_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

pub async fn authenticate(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let Some(token) = presented_token(&headers) else {
        tracing::warn!("token missing, authentication denied");
        return Err(AppError::Unauthorized);
    };
    let admin = AdminToken::check_token_validity(&state, &token).await?;
    tracing::debug!("authenticated admin {}", &admin.name);
    request.extensions_mut().insert(Arc::new(admin));
    Ok(next.run(request).await)
}
