use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::SheetAppender;
use crate::{
    conf::Settings,
    prelude::{AppError, Result},
};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The fields of a Google service account key file this client needs.
#[derive(Deserialize, Debug, Clone)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub struct GoogleSheets {
    client: reqwest::Client,
    api_base: String,
    sheet_id: Option<String>,
    range: String,
    account: Option<ServiceAccount>,
}

fn load_account(path: &str) -> Result<ServiceAccount> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl GoogleSheets {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        let account = match &settings.google_service_account_file {
            Some(path) => match load_account(path) {
                Ok(account) => Some(account),
                Err(e) => {
                    tracing::warn!("could not load service account from {}: {}", path, e);
                    None
                }
            },
            None => None,
        };
        Self::with_account(client, settings, account)
    }

    pub fn with_account(
        client: reqwest::Client,
        settings: &Settings,
        account: Option<ServiceAccount>,
    ) -> Self {
        if account.is_none() || settings.google_sheet_id.is_none() {
            tracing::warn!("spreadsheet export is not configured, appends will fail");
        }
        GoogleSheets {
            client,
            api_base: settings.sheets_api_base.trim_end_matches('/').to_string(),
            sheet_id: settings.google_sheet_id.clone(),
            range: settings.google_sheet_range.clone(),
            account,
        }
    }

    async fn access_token(&self, account: &ServiceAccount) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &account.client_email,
            scope: SHEETS_SCOPE,
            aud: &account.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)?;
        let resp = self
            .client
            .post(&account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(AppError::Upstream(format!(
                "token exchange failed with {}",
                resp.status()
            )));
        }
        let token: TokenResponse = resp.json().await?;
        Ok(token.access_token)
    }

    fn append_url(&self, sheet_id: &str) -> Result<Url> {
        let action = format!("{}:append", &self.range);
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| AppError::Upstream(format!("invalid sheets api base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Upstream("sheets api base cannot hold a path".into()))?
            .pop_if_empty()
            .extend(&[
                "v4",
                "spreadsheets",
                sheet_id,
                "values",
                action.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SheetAppender for GoogleSheets {
    async fn append_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        let (Some(account), Some(sheet_id)) = (&self.account, &self.sheet_id) else {
            return Err(AppError::Upstream("spreadsheet export is not configured".into()));
        };
        if rows.is_empty() {
            return Ok(());
        }
        let token = self.access_token(account).await?;
        let resp = self
            .client
            .post(self.append_url(sheet_id)?)
            .bearer_auth(token)
            .json(&json!({ "values": rows }))
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "sheet append failed ({}): {}",
                status, body
            )));
        }
        tracing::info!("appended {} row(s) to the roster sheet", rows.len());
        Ok(())
    }
}
