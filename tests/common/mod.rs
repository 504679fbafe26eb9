//! Shared test helpers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use tippool::application::digest::DigestConfig;
use tippool::application::format::ReportMode;
use tippool::domain::entities::match_record::MatchRecord;
use tippool::domain::error::DomainError;
use tippool::domain::ports::message_sink::MessageSink;
use tippool::domain::ports::prediction_source::{PredictionSource, SourceError};
use tippool::TipPool;

pub fn record(
    source: &str,
    home: &str,
    away: &str,
    prediction: &str,
    confidence: f64,
) -> MatchRecord {
    MatchRecord {
        source: source.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        league: None,
        kickoff: None,
        prediction: prediction.to_string(),
        confidence,
    }
}

/// Fixed report date so formatter output is stable across test runs.
pub fn digest_config(min_confidence: u8, mode: ReportMode) -> DigestConfig {
    DigestConfig {
        min_confidence,
        max_records: 10,
        mode,
        report_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
    }
}

struct StubSource {
    name: String,
    records: Vec<MatchRecord>,
    fail: bool,
}

#[async_trait]
impl PredictionSource for StubSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<MatchRecord>, SourceError> {
        if self.fail {
            Err(SourceError::Network("stub offline".into()))
        } else {
            Ok(self.records.clone())
        }
    }
}

pub fn stub(name: &str, records: Vec<MatchRecord>) -> Arc<dyn PredictionSource> {
    Arc::new(StubSource {
        name: name.to_string(),
        records,
        fail: false,
    })
}

pub fn failing_stub(name: &str) -> Arc<dyn PredictionSource> {
    Arc::new(StubSource {
        name: name.to_string(),
        records: vec![],
        fail: true,
    })
}

/// Sink that captures delivered messages for assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub delivered: Mutex<Vec<String>>,
}

#[async_trait]
impl MessageSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, text: &str) -> Result<(), DomainError> {
        self.delivered.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn setup(
    sources: Vec<Arc<dyn PredictionSource>>,
    sink: Arc<RecordingSink>,
) -> TipPool {
    TipPool::with_components(":memory:", sources, sink).unwrap()
}
