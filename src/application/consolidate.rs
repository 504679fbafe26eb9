//! Consolidation engine: merges heterogeneous per-source records into one
//! [`ConsolidatedMatch`] per real-world fixture.
//!
//! Pure transformation: no I/O, no shared state, total over any input
//! sequence. Output order is first-seen match order; presentation ordering
//! is the ranking filter's job.

use std::collections::HashMap;

use crate::domain::entities::consolidated_match::{ConsolidatedMatch, SourcePrediction};
use crate::domain::entities::match_record::MatchRecord;
use crate::domain::values::consensus::Consensus;
use crate::domain::values::match_key::MatchKey;

pub struct ConsolidationEngine;

impl ConsolidationEngine {
    pub fn consolidate(&self, records: &[MatchRecord]) -> Vec<ConsolidatedMatch> {
        let mut index: HashMap<MatchKey, usize> = HashMap::new();
        let mut matches: Vec<ConsolidatedMatch> = Vec::new();

        for record in records {
            // Records missing a team name are dropped rather than grouped
            // under an empty key.
            let Ok(key) = MatchKey::resolve(&record.home_team, &record.away_team) else {
                continue;
            };
            match index.get(&key) {
                Some(&i) => merge(&mut matches[i], record),
                None => {
                    index.insert(key, matches.len());
                    matches.push(open(record));
                }
            }
        }

        // Consensus is computed exactly once, after all sources merged.
        for m in &mut matches {
            m.consensus = Consensus::from_sources(&m.sources);
        }
        matches
    }
}

fn open(record: &MatchRecord) -> ConsolidatedMatch {
    ConsolidatedMatch {
        home_team: record.home_team.trim().to_string(),
        away_team: record.away_team.trim().to_string(),
        league: record.league.clone(),
        kickoff: record.kickoff.clone(),
        sources: vec![contribution(record)],
        consensus: Consensus::default(),
    }
}

fn merge(m: &mut ConsolidatedMatch, record: &MatchRecord) {
    // first-seen wins for match metadata
    if m.league.is_none() {
        m.league = record.league.clone();
    }
    if m.kickoff.is_none() {
        m.kickoff = record.kickoff.clone();
    }
    m.sources.push(contribution(record));
}

fn contribution(record: &MatchRecord) -> SourcePrediction {
    SourcePrediction {
        source: record.source.clone(),
        prediction: record.prediction.clone(),
        confidence: record.confidence,
    }
}
