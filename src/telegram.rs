use std::fmt;

use tracing::{error, info};

use crate::error::NotifyError;

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Delivers finished text somewhere. Callers decide what to do with a failure.
pub trait Notifier {
    fn notify(&self, text: &str) -> Result<(), NotifyError>;
}

/// Telegram Bot API client bound to a single chat.
#[derive(Clone)]
pub struct Telegram {
    agent: ureq::Agent,
    api_url: String,
    token: String,
    chat_id: String,
}

impl fmt::Debug for Telegram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telegram").field("chat_id", &self.chat_id).finish_non_exhaustive()
    }
}

impl Telegram {
    /// Create a client that posts to `chat_id` with the given bot token.
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_api_url(TELEGRAM_API_URL, token, chat_id)
    }

    pub fn with_api_url(api_url: &str, token: String, chat_id: String) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent, api_url: api_url.trim_end_matches('/').to_string(), token, chat_id }
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

impl Notifier for Telegram {
    /// Post a plain text message to the configured chat.
    fn notify(&self, text: &str) -> Result<(), NotifyError> {
        let payload = serde_json::json!({ "chat_id": self.chat_id, "text": text });
        match self.agent.post(&self.send_message_url()).send_json(payload) {
            Ok(resp) if resp.status().is_success() => {
                info!(status = resp.status().as_u16(), "Posted message to Telegram");
                Ok(())
            }
            Ok(resp) => {
                let status = resp.status().as_u16();
                let mut body_reader = resp.into_body();
                let body = body_reader.read_to_string().unwrap_or_default();
                error!(status, body = %body, "Telegram rejected message");
                Err(NotifyError::Http { status, body })
            }
            Err(e) => {
                error!(error = %e, "Failed to post to Telegram");
                Err(NotifyError::Transport(e.to_string()))
            }
        }
    }
}
