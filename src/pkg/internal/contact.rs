use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::contacts::{
                mutators::ContactMutator, selectors::ContactSelector, spec::ContactEntry,
            },
            notify::{announce, messages::ContactNotice},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{email_address, AppError, Result},
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactInput {
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub name: String,
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    pub phone: String,
    #[validate(length(min = 1, max = 200, message = "This field may not be blank."))]
    pub subject: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub message: String,
}

pub async fn submit(state: &AppState, input: &ContactInput) -> Result<ContactEntry> {
    input.validate()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let contact = ContactMutator::new(&mut tx).create(input).await?;
    tx.commit().await?;
    tracing::info!("stored contact message {}", contact.id);
    announce(&*state.notifier, &ContactNotice(&contact)).await;
    Ok(contact)
}

pub async fn list(state: &AppState) -> Result<Vec<ContactEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    ContactSelector::new(&mut conn).get_all().await
}

pub async fn delete(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    if !ContactMutator::new(&mut tx).delete(id).await? {
        return Err(AppError::NotFound("contact"));
    }
    tx.commit().await?;
    Ok(())
}
