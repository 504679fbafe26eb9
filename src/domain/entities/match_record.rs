use serde::{Deserialize, Serialize};

/// One source's claim about one match, as normalized by its adapter.
///
/// Records are rebuilt from scratch on every digest run and never persisted
/// raw; only curated summaries reach the history store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Provider that produced this record (e.g. "Forebet").
    pub source: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub league: Option<String>,
    /// Kickoff time as reported, e.g. "20:45". Kept verbatim, not parsed.
    #[serde(default)]
    pub kickoff: Option<String>,
    /// Source-defined outcome label ("1", "X", "OVER", ...). May be empty.
    #[serde(default)]
    pub prediction: String,
    /// Reported reliability, 0–100. Missing values default to 0.
    #[serde(default)]
    pub confidence: f64,
}
