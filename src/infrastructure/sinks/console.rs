use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::ports::message_sink::MessageSink;

/// Prints reports to stdout. Used when no Telegram credentials are
/// configured.
pub struct ConsoleSink;

#[async_trait]
impl MessageSink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn deliver(&self, text: &str) -> Result<(), DomainError> {
        println!("{text}");
        Ok(())
    }
}
