use std::fmt::Display;

use crate::prelude::Result;

pub mod messages;
pub mod telegram;

/// The chat destination a submission is announced on. Each form has its own
/// bot and chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Career,
    Contact,
    Cpu,
    Hackathon,
}

#[async_trait::async_trait]
pub trait ChatNotifier: Send + Sync {
    async fn send(&self, channel: Channel, text: &str) -> Result<()>;
}

/// A human readable summary of a stored submission.
pub trait Announce: Display {
    fn channel(&self) -> Channel;
}

/// Posts the summary to its chat channel. Failures are logged and swallowed.
pub async fn announce<A: Announce + ?Sized>(notifier: &dyn ChatNotifier, notice: &A) {
    let channel = notice.channel();
    let text = notice.to_string();
    match notifier.send(channel, &text).await {
        Ok(()) => tracing::debug!("announced submission on {:?}", channel),
        Err(e) => tracing::warn!("chat notification on {:?} failed: {}", channel, e),
    }
}
