use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::ports::history_store::HistoryStore;

/// Marks a stored prediction with its actual result label, which feeds the
/// per-source accuracy statistics.
pub struct ResolveUseCase {
    history: Arc<dyn HistoryStore>,
}

impl ResolveUseCase {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }

    pub fn execute(&self, id: &str, outcome: &str) -> Result<(), DomainError> {
        let outcome = outcome.trim();
        if outcome.is_empty() {
            return Err(DomainError::InvalidInput("outcome label is empty".into()));
        }
        // labels are compared case-insensitively everywhere else too
        self.history.mark_outcome(id, &outcome.to_uppercase())
    }
}
