use serde::{Deserialize, Serialize};

use crate::domain::values::consensus::Consensus;

/// One source's contribution to a consolidated match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcePrediction {
    pub source: String,
    pub prediction: String,
    pub confidence: f64,
}

/// One real-world match with evidence pooled from every source that
/// reported it.
///
/// Built by the consolidation engine. `sources` keeps merge order and is
/// never empty in engine output; `consensus` is computed exactly once,
/// after all sources have been merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedMatch {
    /// Team names in the first-seen spelling (trimmed).
    pub home_team: String,
    pub away_team: String,
    /// First non-missing value reported by any source.
    pub league: Option<String>,
    pub kickoff: Option<String>,
    pub sources: Vec<SourcePrediction>,
    pub consensus: Consensus,
}
