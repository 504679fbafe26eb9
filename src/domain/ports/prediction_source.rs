use async_trait::async_trait;

use crate::domain::entities::match_record::MatchRecord;

/// Pluggable provider of raw match predictions for today's card.
///
/// Implementations scrape a predictions site or call a fixtures API and
/// normalize whatever they find into [`MatchRecord`]s. The consolidation
/// pipeline never branches on which provider a record came from.
#[async_trait]
pub trait PredictionSource: Send + Sync {
    /// Provider name, also stamped on every record it emits.
    fn name(&self) -> &str;

    /// Fetch today's predictions. Callers degrade a failed fetch to an
    /// empty contribution; it must never abort a whole run.
    async fn fetch(&self) -> Result<Vec<MatchRecord>, SourceError>;
}

#[derive(Debug)]
pub enum SourceError {
    /// HTTP or network error
    Network(String),
    /// Response parsing error
    Parse(String),
    /// Configuration error (missing API key, etc.)
    Config(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "Network error: {msg}"),
            SourceError::Parse(msg) => write!(f, "Parse error: {msg}"),
            SourceError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}
