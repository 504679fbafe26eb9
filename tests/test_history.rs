//! SQLite history store and accuracy statistics.

mod common;

use std::sync::Arc;

use common::record;
use rusqlite::Connection;
use tippool::application::consolidate::ConsolidationEngine;
use tippool::application::stats::StatsUseCase;
use tippool::domain::error::DomainError;
use tippool::domain::ports::history_store::{HistoryFilter, HistoryStore, PredictionSummary};
use tippool::infrastructure::sqlite::history_repo::SqliteHistoryStore;
use tippool::infrastructure::sqlite::migrations::run_migrations;

fn memory_store() -> SqliteHistoryStore {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    SqliteHistoryStore::new(conn)
}

fn summary(home: &str, away: &str, labels: &[(&str, &str, f64)]) -> PredictionSummary {
    let records: Vec<_> = labels
        .iter()
        .map(|(source, label, conf)| record(source, home, away, label, *conf))
        .collect();
    let matches = ConsolidationEngine.consolidate(&records);
    PredictionSummary::from_match(&matches[0])
}

#[test]
fn test_record_and_list_round_trip() {
    let store = memory_store();
    let s = summary(
        "Sporting",
        "Porto",
        &[("Forebet", "1", 70.0), ("Betbrain", "1", 74.0)],
    );
    store.record_summary(&s).unwrap();

    let listed = store.list(&HistoryFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);

    let loaded = &listed[0];
    assert_eq!(loaded.id, s.id);
    assert_eq!(loaded.home_team, "Sporting");
    assert_eq!(loaded.best_prediction.as_deref(), Some("1"));
    assert_eq!(loaded.avg_confidence, 72);
    assert_eq!(loaded.agreement_pct, 100);
    assert_eq!(loaded.source_count, 2);
    assert_eq!(loaded.sources.len(), 2);
    assert_eq!(loaded.sources[0].source, "Forebet");
    assert!(loaded.outcome.is_none());
}

#[test]
fn test_mark_outcome_unknown_id_is_not_found() {
    let store = memory_store();
    let err = store.mark_outcome("no-such-id", "1").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test]
fn test_resolved_filter() {
    let store = memory_store();
    let a = summary("Sporting", "Porto", &[("Forebet", "1", 70.0)]);
    let b = summary("Benfica", "Braga", &[("Forebet", "X", 60.0)]);
    store.record_summary(&a).unwrap();
    store.record_summary(&b).unwrap();
    store.mark_outcome(&a.id, "1").unwrap();

    let resolved = store
        .list(&HistoryFilter {
            resolved: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, a.id);

    let open = store
        .list(&HistoryFilter {
            resolved: Some(false),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, b.id);
}

#[test]
fn test_source_accuracy_scores_each_source_against_outcome() {
    let store = memory_store();

    // Forebet right, Betbrain wrong.
    let first = summary(
        "Sporting",
        "Porto",
        &[("Forebet", "1", 70.0), ("Betbrain", "X", 55.0)],
    );
    store.record_summary(&first).unwrap();
    store.mark_outcome(&first.id, "1").unwrap();

    // Both right; label case must not matter.
    let second = summary(
        "Milan",
        "Inter",
        &[("Forebet", "over", 66.0), ("Betbrain", "OVER", 61.0)],
    );
    store.record_summary(&second).unwrap();
    store.mark_outcome(&second.id, "OVER").unwrap();

    // Unresolved predictions stay out of the accuracy math.
    let pending = summary("Lyon", "Lille", &[("Forebet", "2", 75.0)]);
    store.record_summary(&pending).unwrap();

    let accuracy = store.source_accuracy().unwrap();
    assert_eq!(accuracy.len(), 2);

    let betbrain = accuracy.iter().find(|a| a.source == "Betbrain").unwrap();
    assert_eq!(betbrain.total, 2);
    assert_eq!(betbrain.correct, 1);
    assert_eq!(betbrain.accuracy_pct, 50);

    let forebet = accuracy.iter().find(|a| a.source == "Forebet").unwrap();
    assert_eq!(forebet.total, 2);
    assert_eq!(forebet.correct, 2);
    assert_eq!(forebet.accuracy_pct, 100);
}

#[test]
fn test_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("history.db");

    {
        let conn = Connection::open(&db_path).unwrap();
        run_migrations(&conn).unwrap();
        let store = SqliteHistoryStore::new(conn);
        store
            .record_summary(&summary("Sporting", "Porto", &[("Forebet", "1", 70.0)]))
            .unwrap();
    }

    let conn = Connection::open(&db_path).unwrap();
    run_migrations(&conn).unwrap();
    let store = SqliteHistoryStore::new(conn);
    let listed = store.list(&HistoryFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].home_team, "Sporting");
}

#[test]
fn test_stats_report_totals() {
    let store = Arc::new(memory_store());

    let hit = summary("Sporting", "Porto", &[("Forebet", "1", 70.0)]);
    store.record_summary(&hit).unwrap();
    store.mark_outcome(&hit.id, "1").unwrap();

    let miss = summary("Benfica", "Braga", &[("Forebet", "X", 66.0)]);
    store.record_summary(&miss).unwrap();
    store.mark_outcome(&miss.id, "2").unwrap();

    store
        .record_summary(&summary("Lyon", "Lille", &[("Forebet", "2", 75.0)]))
        .unwrap();

    let stats = StatsUseCase::new(store);
    let report = stats.report().unwrap();
    assert_eq!(report.total_predictions, 3);
    assert_eq!(report.resolved, 2);
    assert_eq!(report.consensus_correct, 1);
    assert_eq!(report.consensus_accuracy_pct, 50);

    let text = stats.render_text(&report);
    assert!(text.contains("PREDICTION STATISTICS"));
    assert!(text.contains("Forebet"));
}
