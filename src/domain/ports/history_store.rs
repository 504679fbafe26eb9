use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::consolidated_match::{ConsolidatedMatch, SourcePrediction};
use crate::domain::error::DomainError;

/// Curated per-match summary handed to the statistics store after a run.
///
/// This is the only shape that outlives a digest; raw records and
/// consolidated matches are discarded with the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    pub league: Option<String>,
    pub best_prediction: Option<String>,
    pub avg_confidence: u8,
    pub agreement_pct: u8,
    pub source_count: usize,
    /// Contributing predictions, used later to score each source.
    pub sources: Vec<SourcePrediction>,
    /// Actual result label, set when the match is resolved.
    pub outcome: Option<String>,
}

impl PredictionSummary {
    pub fn from_match(m: &ConsolidatedMatch) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            recorded_at: Utc::now(),
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            league: m.league.clone(),
            best_prediction: m.consensus.best_prediction.clone(),
            avg_confidence: m.consensus.avg_confidence,
            agreement_pct: m.consensus.agreement_pct,
            source_count: m.consensus.source_count,
            sources: m.sources.clone(),
            outcome: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub limit: Option<usize>,
    pub since: Option<DateTime<Utc>>,
    pub resolved: Option<bool>,
}

/// Hit rate of one provider over resolved predictions.
#[derive(Debug, Clone, Serialize)]
pub struct SourceAccuracy {
    pub source: String,
    pub correct: usize,
    pub total: usize,
    pub accuracy_pct: u8,
}

/// Append-only prediction history.
///
/// The only persistent state in the system. Accessed through this port
/// exclusively; the pure pipeline components cannot reach it.
pub trait HistoryStore: Send + Sync {
    fn record_summary(&self, summary: &PredictionSummary) -> Result<(), DomainError>;

    /// Attach the actual result label to a stored summary.
    fn mark_outcome(&self, id: &str, outcome: &str) -> Result<(), DomainError>;

    fn list(&self, filter: &HistoryFilter) -> Result<Vec<PredictionSummary>, DomainError>;

    /// Per-source hit rate: a source scores when its own label matches the
    /// recorded outcome, independent of what the consensus said.
    fn source_accuracy(&self) -> Result<Vec<SourceAccuracy>, DomainError>;
}
