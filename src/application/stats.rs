use std::sync::Arc;

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::ports::history_store::{HistoryFilter, HistoryStore, SourceAccuracy};

pub struct StatsUseCase {
    history: Arc<dyn HistoryStore>,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub total_predictions: usize,
    pub resolved: usize,
    /// Resolved predictions where the consensus label matched the outcome.
    pub consensus_correct: usize,
    pub consensus_accuracy_pct: u8,
    pub sources: Vec<SourceAccuracy>,
}

impl StatsUseCase {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }

    pub fn report(&self) -> Result<StatsReport, DomainError> {
        let all = self.history.list(&HistoryFilter::default())?;
        let sources = self.history.source_accuracy()?;

        let total_predictions = all.len();
        let resolved_entries: Vec<_> = all.iter().filter(|s| s.outcome.is_some()).collect();
        let resolved = resolved_entries.len();
        let consensus_correct = resolved_entries
            .iter()
            .filter(|s| match (&s.best_prediction, &s.outcome) {
                (Some(best), Some(outcome)) => best.eq_ignore_ascii_case(outcome),
                _ => false,
            })
            .count();
        let consensus_accuracy_pct = if resolved > 0 {
            ((consensus_correct as f64 / resolved as f64) * 100.0).round() as u8
        } else {
            0
        };

        Ok(StatsReport {
            total_predictions,
            resolved,
            consensus_correct,
            consensus_accuracy_pct,
            sources,
        })
    }

    /// Human-readable statistics report with per-source accuracy bars.
    pub fn render_text(&self, report: &StatsReport) -> String {
        let mut out = String::from("📊 <b>PREDICTION STATISTICS</b>\n\n");

        out.push_str("<b>Hit rate per source:</b>\n");
        if report.sources.is_empty() {
            out.push_str("   (no resolved predictions yet)\n");
        }
        for s in &report.sources {
            out.push_str(&format!(
                "   {}: {} {}% ({}/{})\n",
                s.source,
                accuracy_bar(s.accuracy_pct),
                s.accuracy_pct,
                s.correct,
                s.total
            ));
        }

        out.push_str(&format!(
            "\n<b>Consensus:</b>\n   Predictions recorded: {}\n   Resolved: {}\n",
            report.total_predictions, report.resolved
        ));
        if report.resolved > 0 {
            out.push_str(&format!(
                "   Consensus correct: {} ({}%)\n",
                report.consensus_correct, report.consensus_accuracy_pct
            ));
        }
        out
    }
}

fn accuracy_bar(pct: u8) -> String {
    let filled = ((pct as f64 / 10.0).round() as usize).min(10);
    "█".repeat(filled) + &"░".repeat(10 - filled)
}
