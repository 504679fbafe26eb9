use crate::domain::entities::consolidated_match::ConsolidatedMatch;

/// Orders consolidated matches for presentation and drops the noise.
pub struct RankingFilter;

impl RankingFilter {
    /// Keep matches at or above `min_confidence` (inclusive), best first.
    ///
    /// The sort is stable: descending average confidence, then descending
    /// source agreement, then input order. The threshold is always caller
    /// supplied; 65 is only ever a CLI default.
    pub fn rank(
        &self,
        matches: &[ConsolidatedMatch],
        min_confidence: u8,
    ) -> Vec<ConsolidatedMatch> {
        let mut ranked: Vec<ConsolidatedMatch> = matches
            .iter()
            .filter(|m| m.consensus.avg_confidence >= min_confidence)
            .cloned()
            .collect();
        ranked.sort_by(|a, b| {
            b.consensus
                .avg_confidence
                .cmp(&a.consensus.avg_confidence)
                .then_with(|| b.consensus.agreement_pct.cmp(&a.consensus.agreement_pct))
        });
        ranked
    }
}
