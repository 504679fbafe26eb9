use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Outbound channel for rendered reports.
///
/// Implementations own transport concerns such as message-length chunking
/// and retry pacing; the pipeline hands over finished text only.
#[async_trait]
pub trait MessageSink: Send + Sync {
    fn name(&self) -> &str;

    async fn deliver(&self, text: &str) -> Result<(), DomainError>;
}
