use std::collections::HashMap;

use serde::Deserialize;

use super::{Channel, ChatNotifier};
use crate::{
    conf::Settings,
    prelude::{AppError, Result},
};

#[derive(Debug, Clone)]
struct Bot {
    token: String,
    chat_id: String,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bots: HashMap<Channel, Bot>,
}

impl TelegramNotifier {
    pub fn new(client: reqwest::Client, settings: &Settings) -> Self {
        let pairs = [
            (
                Channel::Career,
                &settings.telegram_career_bot_token,
                &settings.telegram_career_chat_id,
            ),
            (
                Channel::Contact,
                &settings.telegram_contact_bot_token,
                &settings.telegram_contact_chat_id,
            ),
            (
                Channel::Cpu,
                &settings.telegram_cpu_bot_token,
                &settings.telegram_cpu_chat_id,
            ),
            (
                Channel::Hackathon,
                &settings.telegram_hackathon_bot_token,
                &settings.telegram_hackathon_chat_id,
            ),
        ];
        let mut bots = HashMap::new();
        for (channel, token, chat_id) in pairs {
            match (token, chat_id) {
                (Some(token), Some(chat_id)) => {
                    bots.insert(
                        channel,
                        Bot {
                            token: token.clone(),
                            chat_id: chat_id.clone(),
                        },
                    );
                }
                _ => tracing::warn!("no telegram bot configured for {:?}", channel),
            }
        }
        TelegramNotifier {
            client,
            api_base: settings.telegram_api_base.trim_end_matches('/').to_string(),
            bots,
        }
    }
}

#[async_trait::async_trait]
impl ChatNotifier for TelegramNotifier {
    async fn send(&self, channel: Channel, text: &str) -> Result<()> {
        let bot = self
            .bots
            .get(&channel)
            .ok_or_else(|| AppError::Upstream(format!("no telegram bot for {:?}", channel)))?;
        let url = format!("{}/bot{}/sendMessage", &self.api_base, &bot.token);
        let resp = self
            .client
            .post(url)
            .form(&[("chat_id", bot.chat_id.as_str()), ("text", text)])
            .send()
            .await?;
        let status = resp.status();
        let body: SendMessageResponse = resp.json().await.map_err(|e| {
            AppError::Upstream(format!("telegram returned {} with unreadable body: {}", status, e))
        })?;
        tracing::debug!("telegram: {}", status);
        if !status.is_success() || !body.ok {
            return Err(AppError::Upstream(format!(
                "telegram rejected message ({}): {}",
                status,
                body.description.unwrap_or_default()
            )));
        }
        Ok(())
    }
}
