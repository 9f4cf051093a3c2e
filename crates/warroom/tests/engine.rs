//! End-to-end evaluations against the default configuration.

use approx::assert_relative_eq;
use chrono::{TimeZone, Utc};
use warroom::prelude::*;
use warroom::signals::{ContributionStatus, registry};
use warroom::store::{JsonFileStore, MemoryStore};

fn at() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 11, 8, 16, 30, 0).unwrap()
}

fn trend(label: &str) -> SignalRecord {
    TechnicalTrend {
        price: 2684.5,
        trend_label: label.to_string(),
    }
    .into_record(at())
}

fn flow(label: &str) -> SignalRecord {
    FundFlow {
        price: 247.9,
        volume: 8_113_400,
        status_label: label.to_string(),
    }
    .into_record(at())
}

fn positioning(label: &str) -> SignalRecord {
    Positioning {
        net_position: 243_118.0,
        status_label: label.to_string(),
    }
    .into_record(at())
}

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).unwrap()
}

#[test]
fn all_bullish_is_strong_bullish() {
    let snapshot: Snapshot = [trend("UPTREND"), flow("BUY"), positioning("BULLISH")]
        .into_iter()
        .collect();

    let evaluation = engine().evaluate(&snapshot);
    assert_relative_eq!(evaluation.composite_score, 10.0);
    assert_relative_eq!(evaluation.max_score, 10.0);
    assert_eq!(evaluation.sources_present, 3);
    assert_eq!(evaluation.band.name, "STRONG_BULLISH");
    assert!(!evaluation.is_indeterminate());
}

#[test]
fn bearish_positioning_pulls_to_neutral() {
    let snapshot: Snapshot = [trend("UPTREND"), flow("BUY"), positioning("BEARISH")]
        .into_iter()
        .collect();

    let evaluation = engine().evaluate(&snapshot);
    assert_relative_eq!(evaluation.composite_score, 2.0);
    assert_eq!(evaluation.band.name, "NEUTRAL");

    let positioning = evaluation.source("positioning").unwrap();
    assert_relative_eq!(positioning.weighted_contribution, -4.0);
    assert_eq!(positioning.matched_rule.as_deref(), Some("BEARISH"));
}

#[test]
fn lone_sell_is_moderate_bearish_on_partial_coverage() {
    let snapshot = Snapshot::new().with_record(flow("SELL"));

    let evaluation = engine().evaluate(&snapshot);
    assert_relative_eq!(evaluation.composite_score, -3.0);
    assert_eq!(evaluation.sources_present, 1);
    assert_eq!(evaluation.coverage(), "1/3");
    assert_eq!(evaluation.band.name, "MODERATE_BEARISH");
    assert!(!evaluation.is_indeterminate());
}

#[test]
fn all_absent_differs_from_all_neutral() {
    let absent = engine().evaluate(&Snapshot::new());

    let neutral: Snapshot = [trend("SIDEWAY"), flow("HOLD"), positioning("NEUTRAL")]
        .into_iter()
        .collect();
    let neutral = engine().evaluate(&neutral);

    assert_relative_eq!(absent.composite_score, 0.0);
    assert_relative_eq!(neutral.composite_score, 0.0);
    assert_eq!(absent.band, neutral.band);

    assert_eq!(absent.sources_present, 0);
    assert_eq!(neutral.sources_present, 3);
    assert!(absent.is_indeterminate());
    assert!(!neutral.is_indeterminate());
    assert!(
        absent
            .sources
            .iter()
            .all(|s| s.status == ContributionStatus::Missing)
    );
}

#[test]
fn evaluation_is_idempotent() {
    let snapshot: Snapshot = [trend("CORRECTION"), flow("BUY"), positioning("BULLISH")]
        .into_iter()
        .collect();

    let engine = engine();
    let first = engine.evaluate(&snapshot);
    let second = engine.evaluate(&snapshot);
    assert_eq!(first, second);
    assert_relative_eq!(first.composite_score, 6.0);
    assert_eq!(first.band.name, "MODERATE_BULLISH");
}

#[test]
fn score_stays_within_total_weight() {
    let labels = [
        ("UPTREND", "BUY", "BULLISH"),
        ("DOWNTREND", "SELL", "BEARISH"),
        ("RECOVERY", "SELL", "BULLISH"),
        ("CORRECTION", "HOLD", "BEARISH"),
    ];

    let engine = engine();
    for (t, f, p) in labels {
        let snapshot: Snapshot = [trend(t), flow(f), positioning(p)].into_iter().collect();
        let evaluation = engine.evaluate(&snapshot);
        assert!(evaluation.composite_score.abs() <= evaluation.max_score);
    }
}

#[test]
fn sentiment_is_opt_in() {
    let sentiment = Sentiment {
        score: 80.0,
        summary: "Risk-off flows into bullion".to_string(),
    }
    .into_record(at());
    let snapshot = Snapshot::new().with_record(sentiment);

    assert_eq!(engine().evaluate(&snapshot).sources_present, 0);

    let engine = Engine::new(EngineConfig::default().with_source(registry::sentiment())).unwrap();
    let evaluation = engine.evaluate(&snapshot);
    assert_eq!(evaluation.coverage(), "1/4");
    assert_relative_eq!(evaluation.composite_score, 1.2, epsilon = 1e-12);
    assert_relative_eq!(evaluation.max_score, 12.0);
}

#[test]
fn evaluation_serializes_breakdown() {
    let evaluation = engine().evaluate(&Snapshot::new().with_record(flow("SELL")));
    let json: serde_json::Value = serde_json::from_str(&evaluation.to_json().unwrap()).unwrap();

    assert_eq!(json["composite_score"], -3.0);
    assert_eq!(json["recommendation_band"]["name"], "MODERATE_BEARISH");
    assert_eq!(json["sources"][1]["source_id"], "fund_flow");
    assert_eq!(json["sources"][1]["raw_status"], "SELL");
    assert_eq!(json["sources"][0]["status"]["kind"], "missing");
}

#[tokio::test]
async fn file_store_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());

    store.put(trend("UPTREND")).await.unwrap();
    store.put(flow("BUY")).await.unwrap();
    std::fs::write(dir.path().join("positioning.json"), "{ not json").unwrap();

    let evaluation = engine().evaluate_store(&store).await;
    assert_relative_eq!(evaluation.composite_score, 6.0);
    assert_eq!(evaluation.coverage(), "2/3");
    assert!(matches!(
        evaluation.source("positioning").unwrap().status,
        ContributionStatus::Unreadable { .. }
    ));
}

#[tokio::test]
async fn memory_store_replaces_latest_record() {
    let store = MemoryStore::new();
    store.put(positioning("BULLISH")).await.unwrap();
    store.put(positioning("BEARISH")).await.unwrap();

    let evaluation = engine().evaluate_store(&store).await;
    assert_relative_eq!(evaluation.composite_score, -4.0);
    assert_eq!(evaluation.band.name, "MODERATE_BEARISH");
}
