use std::sync::Arc;

use crate::{
    conf::Settings,
    pkg::{internal::auth::Admin, server::state::AppState},
    prelude::Result,
};

pub async fn create(settings: Arc<Settings>, name: &str) -> Result<()> {
    let state = AppState::new(settings).await?;
    let admin = Admin::create(&state, name).await?;
    let token = admin.issue_token(&state).await?;
    tracing::info!("issued admin token for {}", &admin.name);
    println!("admin: {}", admin.name);
    println!("token: {}", token.token);
    println!("expires: {}", token.expiry.to_rfc3339());
    Ok(())
}
