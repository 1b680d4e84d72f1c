use serde::Deserialize;
use validator::Validate;

use crate::{
    pkg::{
        internal::{
            adaptors::inquiries::{
                mutators::InquiryMutator, selectors::InquirySelector, spec::InquiryEntry,
            },
            notify::{announce, messages::InquiryNotice},
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{accept, email_address, validation_errors, AppError, Lenient, Result},
};

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct InquiryInput {
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub full_name: String,
    #[validate(custom(function = "email_address"))]
    pub email: String,
    #[validate(length(min = 1, max = 20, message = "This field may not be blank."))]
    pub phone: String,
    #[validate(length(min = 1, max = 100, message = "This field may not be blank."))]
    pub cpu_model: String,
    pub quantity: Lenient,
    pub ram: String,
    pub storage: String,
    pub message: String,
}

impl InquiryInput {
    /// Runs the field rules and returns the requested quantity.
    fn check(&self) -> Result<i64> {
        let mut errors = validation_errors(self);
        let quantity = accept(
            &mut errors,
            "quantity",
            self.quantity.integer().and_then(|q| {
                if q < 1 {
                    Err("Ensure this value is greater than or equal to 1.".to_string())
                } else {
                    Ok(q)
                }
            }),
        );
        match quantity {
            Some(quantity) if errors.is_empty() => Ok(quantity),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

pub async fn submit(state: &AppState, input: &InquiryInput) -> Result<InquiryEntry> {
    let quantity = input.check()?;
    let mut tx = state.db_pool.begin_txn().await?;
    let inquiry = InquiryMutator::new(&mut tx).create(input, quantity).await?;
    tx.commit().await?;
    tracing::info!("stored cpu inquiry {}", inquiry.id);
    announce(&*state.notifier, &InquiryNotice(&inquiry)).await;
    Ok(inquiry)
}

pub async fn list(state: &AppState) -> Result<Vec<InquiryEntry>> {
    let mut conn = state.db_pool.acquire().await?;
    InquirySelector::new(&mut conn).get_all().await
}

pub async fn delete(state: &AppState, id: i64) -> Result<()> {
    let mut tx = state.db_pool.begin_txn().await?;
    if !InquiryMutator::new(&mut tx).delete(id).await? {
        return Err(AppError::NotFound("inquiry"));
    }
    tx.commit().await?;
    Ok(())
}
