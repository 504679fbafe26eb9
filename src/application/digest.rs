//! Digest use case: fans out to every prediction source, waits for all of
//! them, then runs the pure pipeline (consolidate, rank, format) and files
//! a summary of each ranked match with the history store.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::task::JoinSet;

use crate::application::consolidate::ConsolidationEngine;
use crate::application::format::{MessageFormatter, ReportMode, ReportOptions};
use crate::application::rank::RankingFilter;
use crate::domain::entities::consolidated_match::ConsolidatedMatch;
use crate::domain::entities::match_record::MatchRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::history_store::{HistoryStore, PredictionSummary};
use crate::domain::ports::prediction_source::PredictionSource;

/// Explicit knobs for one digest run. Nothing here has a hidden default
/// inside the pipeline; callers decide thresholds and caps.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Minimum average confidence a match needs to appear in the report.
    pub min_confidence: u8,
    /// Record cap for full reports.
    pub max_records: usize,
    pub mode: ReportMode,
    pub report_date: NaiveDate,
}

/// Outcome of one digest run, machine-readable.
#[derive(Debug, Serialize)]
pub struct DigestRun {
    pub report_date: NaiveDate,
    pub sources_ok: usize,
    pub sources_failed: usize,
    pub records_fetched: usize,
    pub matches_consolidated: usize,
    pub matches_ranked: usize,
    /// Ranked matches, best first. The shape the statistics collaborator
    /// consumes.
    pub matches: Vec<ConsolidatedMatch>,
    /// Rendered report, `None` when there is nothing to publish.
    pub message: Option<String>,
}

pub struct DigestUseCase {
    sources: Vec<Arc<dyn PredictionSource>>,
    history: Arc<dyn HistoryStore>,
    engine: ConsolidationEngine,
    ranking: RankingFilter,
    formatter: MessageFormatter,
}

impl DigestUseCase {
    pub fn new(sources: Vec<Arc<dyn PredictionSource>>, history: Arc<dyn HistoryStore>) -> Self {
        Self {
            sources,
            history,
            engine: ConsolidationEngine,
            ranking: RankingFilter,
            formatter: MessageFormatter,
        }
    }

    pub async fn execute(&self, config: &DigestConfig) -> Result<DigestRun, DomainError> {
        let (records, sources_ok, sources_failed) = self.fetch_all().await;
        let records_fetched = records.len();

        let consolidated = self.engine.consolidate(&records);
        let ranked = self.ranking.rank(&consolidated, config.min_confidence);
        let message = self.formatter.format(
            &ranked,
            config.mode,
            &ReportOptions {
                report_date: config.report_date,
                min_confidence: config.min_confidence,
                max_records: config.max_records,
            },
        );

        // History write failures must not abort the run.
        for m in &ranked {
            let summary = PredictionSummary::from_match(m);
            if let Err(e) = self.history.record_summary(&summary) {
                eprintln!("Warning: failed to record prediction history: {e}");
            }
        }

        Ok(DigestRun {
            report_date: config.report_date,
            sources_ok,
            sources_failed,
            records_fetched,
            matches_consolidated: consolidated.len(),
            matches_ranked: ranked.len(),
            matches: ranked,
            message,
        })
    }

    /// Concurrent fan-out over all sources with a full fan-in barrier.
    /// A failed source degrades to an empty contribution. Completion order
    /// is not stable across runs.
    async fn fetch_all(&self) -> (Vec<MatchRecord>, usize, usize) {
        let mut set = JoinSet::new();
        for source in &self.sources {
            let source = Arc::clone(source);
            set.spawn(async move {
                let name = source.name().to_string();
                (name, source.fetch().await)
            });
        }

        let mut records = Vec::new();
        let mut ok = 0usize;
        let mut failed = 0usize;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, Ok(mut fetched))) => {
                    ok += 1;
                    records.append(&mut fetched);
                }
                Ok((name, Err(e))) => {
                    failed += 1;
                    eprintln!("Warning: source '{name}' failed: {e} (continuing without it)");
                }
                Err(e) => {
                    failed += 1;
                    eprintln!("Warning: source task aborted: {e}");
                }
            }
        }
        (records, ok, failed)
    }
}
