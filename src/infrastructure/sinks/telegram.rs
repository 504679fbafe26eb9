use std::time::Duration;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::ports::message_sink::MessageSink;

/// Telegram Bot API message cap.
const MAX_MESSAGE_LEN: usize = 4096;

/// Telegram Bot API sink. Long reports are split on line boundaries to
/// stay under the message cap, with a short pause between parts.
pub struct TelegramSink {
    token: String,
    chat_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl TelegramSink {
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_base_url(token, chat_id, "https://api.telegram.org".into())
    }

    pub fn with_base_url(token: String, chat_id: String, base_url: String) -> Self {
        Self {
            token,
            chat_id,
            base_url,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Split on line boundaries so no part exceeds `max_len`. A single
    /// line longer than the cap is passed through as its own part.
    fn chunk_lines(text: &str, max_len: usize) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = String::new();
        for line in text.split('\n') {
            if !current.is_empty() && current.len() + line.len() + 1 > max_len {
                parts.push(std::mem::take(&mut current));
            }
            current.push_str(line);
            current.push('\n');
        }
        if !current.trim().is_empty() {
            parts.push(current);
        }
        parts
    }

    async fn send_one(&self, text: &str) -> Result<(), DomainError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }))
            .send()
            .await
            .map_err(|e| DomainError::Delivery(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Delivery(format!(
                "Telegram returned {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn deliver(&self, text: &str) -> Result<(), DomainError> {
        let parts = Self::chunk_lines(text, MAX_MESSAGE_LEN);
        let last = parts.len().saturating_sub(1);
        for (i, part) in parts.iter().enumerate() {
            self.send_one(part.trim_end()).await?;
            if i < last {
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
        Ok(())
    }
}
