//! Ranking filter: threshold boundary and stable ordering.

mod common;

use common::record;
use tippool::application::consolidate::ConsolidationEngine;
use tippool::application::rank::RankingFilter;
use tippool::domain::entities::consolidated_match::ConsolidatedMatch;

fn single_match(home: &str, away: &str, label: &str, confidence: f64) -> ConsolidatedMatch {
    let matches = ConsolidationEngine.consolidate(&[record("A", home, away, label, confidence)]);
    matches.into_iter().next().unwrap()
}

#[test]
fn test_threshold_is_inclusive() {
    let filter = RankingFilter;
    let matches = vec![
        single_match("Sporting", "Porto", "1", 65.0),
        single_match("Benfica", "Braga", "1", 64.0),
    ];

    let ranked = filter.rank(&matches, 65);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].home_team, "Sporting");
}

#[test]
fn test_sorts_by_confidence_with_stable_ties() {
    let filter = RankingFilter;
    let matches = vec![
        single_match("TeamA1", "TeamA2", "1", 80.0),
        single_match("TeamB1", "TeamB2", "1", 80.0),
        single_match("TeamC1", "TeamC2", "1", 90.0),
    ];

    let ranked = filter.rank(&matches, 0);
    let order: Vec<&str> = ranked.iter().map(|m| m.home_team.as_str()).collect();
    assert_eq!(order, ["TeamC1", "TeamA1", "TeamB1"]);
}

#[test]
fn test_equal_confidence_breaks_on_agreement() {
    let filter = RankingFilter;
    let engine = ConsolidationEngine;

    // Split vote: 80% confidence, 50% agreement.
    let split = engine.consolidate(&[
        record("A", "Milan", "Inter", "1", 80.0),
        record("B", "Milan", "Inter", "X", 80.0),
    ]);
    // Unanimous: 80% confidence, 100% agreement.
    let unanimous = engine.consolidate(&[
        record("A", "Lyon", "Lille", "2", 80.0),
        record("B", "Lyon", "Lille", "2", 80.0),
    ]);

    let mut matches = split;
    matches.extend(unanimous);

    let ranked = filter.rank(&matches, 0);
    assert_eq!(ranked[0].home_team, "Lyon");
    assert_eq!(ranked[1].home_team, "Milan");
}

#[test]
fn test_input_is_not_mutated() {
    let filter = RankingFilter;
    let matches = vec![
        single_match("TeamA1", "TeamA2", "1", 50.0),
        single_match("TeamB1", "TeamB2", "1", 90.0),
    ];

    let _ranked = filter.rank(&matches, 0);
    assert_eq!(matches[0].home_team, "TeamA1");
    assert_eq!(matches[1].home_team, "TeamB1");
}

#[test]
fn test_sentinel_consensus_only_passes_a_zero_threshold() {
    let filter = RankingFilter;
    let matches = vec![single_match("Sporting", "Porto", "", 80.0)];

    assert!(filter.rank(&matches, 65).is_empty());
    assert_eq!(filter.rank(&matches, 0).len(), 1);
}

#[test]
fn test_empty_input_yields_empty_output() {
    let filter = RankingFilter;
    assert!(filter.rank(&[], 65).is_empty());
}
