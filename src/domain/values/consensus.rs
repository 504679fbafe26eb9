use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::entities::consolidated_match::SourcePrediction;

/// Derived per-match summary of how much the sources agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    /// Winning prediction label, upper-cased. `None` when no source
    /// carried a usable label for this match.
    pub best_prediction: Option<String>,
    /// Share of sources backing the winning label, 0–100.
    pub agreement_pct: u8,
    /// Rounded mean of the reported confidences, 0–100.
    pub avg_confidence: u8,
    pub source_count: usize,
}

impl Consensus {
    /// Pool the evidence from one match's sources.
    ///
    /// Labels are compared case-insensitively. A tie on occurrence count
    /// goes to the label that reached the winning count first in merge
    /// order. A match where no source carries a non-empty label gets the
    /// sentinel consensus: no best prediction, both percentages zero.
    pub fn from_sources(sources: &[SourcePrediction]) -> Self {
        let source_count = sources.len();
        if source_count == 0 {
            return Consensus {
                source_count,
                ..Default::default()
            };
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut best: Option<(String, usize)> = None;
        for s in sources {
            let label = s.prediction.trim().to_uppercase();
            if label.is_empty() {
                continue;
            }
            let count = counts.entry(label.clone()).or_insert(0);
            *count += 1;
            // strict > keeps the earlier label on ties
            if best.as_ref().is_none_or(|(_, c)| *count > *c) {
                best = Some((label, *count));
            }
        }

        let Some((label, count)) = best else {
            return Consensus {
                source_count,
                ..Default::default()
            };
        };

        let total: f64 = sources.iter().map(|s| s.confidence).sum();
        Consensus {
            best_prediction: Some(label),
            agreement_pct: pct(count as f64 / source_count as f64 * 100.0),
            avg_confidence: pct(total / source_count as f64),
            source_count,
        }
    }
}

fn pct(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
