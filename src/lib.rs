pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::digest::{DigestConfig, DigestRun, DigestUseCase};
use crate::application::resolve::ResolveUseCase;
use crate::application::stats::{StatsReport, StatsUseCase};
use crate::domain::error::DomainError;
use crate::domain::ports::history_store::{HistoryFilter, HistoryStore, PredictionSummary};
use crate::domain::ports::message_sink::MessageSink;
use crate::domain::ports::prediction_source::PredictionSource;
use crate::infrastructure::sinks::console::ConsoleSink;
use crate::infrastructure::sinks::telegram::TelegramSink;
use crate::infrastructure::sources::api_football::ApiFootballSource;
use crate::infrastructure::sources::betbrain::BetbrainSource;
use crate::infrastructure::sources::escored::EscoredSource;
use crate::infrastructure::sources::forebet::ForebetSource;
use crate::infrastructure::sqlite::history_repo::SqliteHistoryStore;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::Arc;

pub struct TipPool {
    digest_uc: DigestUseCase,
    stats_uc: StatsUseCase,
    resolve_uc: ResolveUseCase,
    history: Arc<dyn HistoryStore>,
    sink: Arc<dyn MessageSink>,
}

impl TipPool {
    /// Wire the default providers from environment configuration:
    /// the three scraping sources always, API-Football when a key is set,
    /// and the Telegram sink when bot credentials are present.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let mut sources: Vec<Arc<dyn PredictionSource>> = vec![
            Arc::new(ForebetSource::new()),
            Arc::new(BetbrainSource::new()),
            Arc::new(EscoredSource::new()),
        ];
        if let Ok(key) = std::env::var("FOOTBALL_API_KEY") {
            if !key.is_empty() {
                sources.push(Arc::new(ApiFootballSource::new(key)));
            }
        }

        let sink: Arc<dyn MessageSink> = match (
            std::env::var("TIPPOOL_TELEGRAM_TOKEN"),
            std::env::var("TIPPOOL_TELEGRAM_CHAT"),
        ) {
            (Ok(token), Ok(chat)) if !token.is_empty() && !chat.is_empty() => {
                Arc::new(TelegramSink::new(token, chat))
            }
            _ => Arc::new(ConsoleSink),
        };

        Self::with_components(db_path, sources, sink)
    }

    /// Explicit wiring, used by tests and alternative compositions.
    pub fn with_components(
        db_path: &str,
        sources: Vec<Arc<dyn PredictionSource>>,
        sink: Arc<dyn MessageSink>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn)?;
        let history: Arc<dyn HistoryStore> = Arc::new(SqliteHistoryStore::new(conn));

        Ok(Self {
            digest_uc: DigestUseCase::new(sources, history.clone()),
            stats_uc: StatsUseCase::new(history.clone()),
            resolve_uc: ResolveUseCase::new(history.clone()),
            history,
            sink,
        })
    }

    // Delegating methods
    pub async fn run_digest(&self, config: &DigestConfig) -> Result<DigestRun, DomainError> {
        self.digest_uc.execute(config).await
    }

    /// Run a digest and push the rendered report through the configured
    /// sink. An empty day publishes a fallback note rather than silence.
    pub async fn publish_digest(&self, config: &DigestConfig) -> Result<DigestRun, DomainError> {
        let run = self.digest_uc.execute(config).await?;
        match &run.message {
            Some(text) => self.sink.deliver(text).await?,
            None => {
                let fallback = format!(
                    "📅 <b>Consolidated predictions - {}</b>\n\n⚠️ No predictions available today.\n\nCheck back tomorrow!",
                    config.report_date.format("%d/%m/%Y")
                );
                self.sink.deliver(&fallback).await?;
            }
        }
        Ok(run)
    }

    pub fn stats(&self) -> Result<StatsReport, DomainError> {
        self.stats_uc.report()
    }

    pub fn stats_text(&self) -> Result<String, DomainError> {
        let report = self.stats_uc.report()?;
        Ok(self.stats_uc.render_text(&report))
    }

    pub fn resolve(&self, id: &str, outcome: &str) -> Result<(), DomainError> {
        self.resolve_uc.execute(id, outcome)
    }

    pub fn history(&self, filter: &HistoryFilter) -> Result<Vec<PredictionSummary>, DomainError> {
        self.history.list(filter)
    }
}
