//! Projects shown on the public site, managed by administrators.

use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::adaptors::projects::{
            mutators::ProjectMutator, selectors::ProjectSelector, spec::ProjectEntry,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{AppError, Result},
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 200, message = "This field may not be blank."))]
    pub title: String,
    pub description: String,
    #[validate(url(message = "Enter a valid URL."))]
    pub link: Option<String>,
}

pub async fn list(state: &AppState) -> Result<Vec<ProjectEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    ProjectSelector::new(&mut conn).get_all().await
}

pub async fn create(state: &AppState, input: &ProjectInput) -> Result<ProjectEntry> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let project = ProjectMutator::new(&mut tx).create(input).await?;
    tx.commit().await?;
    Ok(project)
}

pub async fn update(state: &AppState, id: i64, input: &ProjectInput) -> Result<ProjectEntry> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let project = ProjectMutator::new(&mut tx)
        .update(id, input)
        .await?
        .ok_or(AppError::NotFound("project"))?;
    tx.commit().await?;
    Ok(project)
}

pub async fn delete(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    if !ProjectMutator::new(&mut tx).delete(id).await? {
        return Err(AppError::NotFound("project"));
    }
    tx.commit().await?;
    Ok(())
}
