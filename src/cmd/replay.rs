use std::sync::Arc;

use crate::{
    conf::Settings,
    pkg::{internal::hackathon, server::state::AppState},
    prelude::Result,
};

pub async fn run(settings: Arc<Settings>) -> Result<()> {
    let state = AppState::new(settings).await?;
    let outcome = hackathon::replay_backlog(&state).await?;
    println!(
        "replayed {} team(s), {} still pending",
        outcome.replayed, outcome.pending
    );
    Ok(())
}
