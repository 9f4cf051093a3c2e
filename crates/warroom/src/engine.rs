//! The aggregation engine.

use tracing::{debug, info, warn};
use warroom_combine::{Term, aggregate};
use warroom_signals::{ContributionStatus, normalize};
use warroom_traits::{RecordStore, Result, Snapshot, SourceId};

use crate::config::EngineConfig;
use crate::report::{Evaluation, SourceBreakdown};

/// Normalizes, aggregates and classifies a snapshot.
///
/// An `Engine` only exists for a valid configuration and holds no mutable
/// state, so it can be shared freely between threads and called concurrently.
///
/// # Example
///
/// ```
/// use warroom::{Engine, EngineConfig};
/// use warroom::traits::{FundFlow, Snapshot};
/// use chrono::Utc;
///
/// let engine = Engine::new(EngineConfig::default())?;
///
/// let snapshot = Snapshot::new()
///     .with_record(FundFlow::from_change(229.1, 231.0, 6_200_000).into_record(Utc::now()));
///
/// let evaluation = engine.evaluate(&snapshot);
/// assert_eq!(evaluation.composite_score, -3.0);
/// assert_eq!(evaluation.coverage(), "1/3");
/// assert_eq!(evaluation.band.name, "MODERATE_BEARISH");
/// # Ok::<(), warroom::WarRoomError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    source_ids: Vec<SourceId>,
}

impl Engine {
    /// Builds an engine, refusing invalid configurations.
    ///
    /// # Errors
    ///
    /// Returns [`WarRoomError::Configuration`](crate::WarRoomError::Configuration)
    /// if the configuration does not validate.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let source_ids = config.source_ids();
        Ok(Self { config, source_ids })
    }

    /// The validated configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Configured source identifiers, in accumulation order.
    pub fn source_ids(&self) -> &[SourceId] {
        &self.source_ids
    }

    /// Evaluates one snapshot.
    ///
    /// Never fails: sources that are missing, unreadable or malformed count
    /// as absent. Identical snapshots always produce identical evaluations.
    pub fn evaluate(&self, snapshot: &Snapshot) -> Evaluation {
        let mut terms = Vec::with_capacity(self.config.sources.len());
        let mut sources = Vec::with_capacity(self.config.sources.len());

        for spec in &self.config.sources {
            let reading = snapshot.get(spec.id.as_str());
            let contribution = normalize(spec, reading);
            let present = contribution.is_present();

            let term = if present {
                Term::present(spec.weight, contribution.direction)
            } else {
                Term::absent(spec.weight)
            };

            match &contribution.status {
                ContributionStatus::Present => debug!(
                    source = %spec.id,
                    direction = contribution.direction,
                    weighted = term.contribution(),
                    rule = contribution.matched_rule.as_deref().unwrap_or("-"),
                    "source contribution"
                ),
                ContributionStatus::Missing => debug!(source = %spec.id, "source missing"),
                status => warn!(source = %spec.id, ?status, "source degraded to absent"),
            }

            let record = reading.record();
            sources.push(SourceBreakdown {
                source_id: spec.id.clone(),
                present,
                status: contribution.status,
                raw_status: record.and_then(|r| r.raw_status.clone()),
                direction: contribution.direction,
                weight: spec.weight,
                weighted_contribution: term.contribution(),
                matched_rule: contribution.matched_rule,
                payload: record.map(|r| r.payload.clone()).unwrap_or_default(),
                timestamp: record.map(|r| r.timestamp),
            });
            terms.push(term);
        }

        let score = aggregate(&terms);
        let band = self.config.bands.classify(score.value).clone();
        let indeterminate = score.sources_present < self.config.min_sources_present;

        info!(
            score = score.value,
            max = score.max,
            present = score.sources_present,
            total = score.sources_total,
            band = %band.name,
            indeterminate,
            "evaluation complete"
        );

        Evaluation {
            sources,
            composite_score: score.value,
            max_score: score.max,
            sources_present: score.sources_present,
            sources_total: score.sources_total,
            band,
            indeterminate,
        }
    }

    /// Takes a snapshot of every configured source from `store` and
    /// evaluates it.
    pub async fn evaluate_store<S: RecordStore>(&self, store: &S) -> Evaluation {
        let snapshot = store.snapshot(&self.source_ids).await;
        self.evaluate(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Utc;
    use warroom_combine::BandTable;
    use warroom_signals::registry;
    use warroom_traits::{SignalRecord, SourceReading, WarRoomError, ids};

    fn record(source: &str, status: &str) -> SignalRecord {
        let record = SignalRecord::new(source, Utc::now()).with_status(status);
        match source {
            ids::TECHNICAL_TREND => record.with_field("price", 2650.0),
            ids::FUND_FLOW => record.with_field("price", 231.0).with_field("volume", 1_000),
            ids::POSITIONING => record.with_field("net_position", 150_000),
            _ => record,
        }
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_refuses_invalid_config() {
        let config = EngineConfig::default().with_source(registry::fund_flow().with_weight(-1.0));
        assert!(matches!(
            Engine::new(config),
            Err(WarRoomError::Configuration(_))
        ));
    }

    #[test]
    fn test_no_sources_is_indeterminate() {
        let evaluation = engine().evaluate(&Snapshot::new());
        assert_relative_eq!(evaluation.composite_score, 0.0);
        assert_eq!(evaluation.sources_present, 0);
        assert!(evaluation.is_indeterminate());
        assert_eq!(evaluation.band.name, "NEUTRAL");
        assert!(evaluation.sources.iter().all(|s| !s.present));
    }

    #[test]
    fn test_all_neutral_is_determinate() {
        let snapshot: Snapshot = [
            record(ids::POSITIONING, "FLAT"),
            record(ids::FUND_FLOW, "HOLD"),
            record(ids::TECHNICAL_TREND, "SIDEWAY"),
        ]
        .into_iter()
        .collect();

        let evaluation = engine().evaluate(&snapshot);
        assert_relative_eq!(evaluation.composite_score, 0.0);
        assert_eq!(evaluation.sources_present, 3);
        assert!(!evaluation.is_indeterminate());
    }

    #[test]
    fn test_malformed_source_keeps_label_for_display() {
        let snapshot = Snapshot::new().with_record(
            SignalRecord::new(ids::POSITIONING, Utc::now())
                .with_status("BULLISH")
                .with_field("net_position", "twelve"),
        );

        let evaluation = engine().evaluate(&snapshot);
        let positioning = evaluation.source(ids::POSITIONING).unwrap();
        assert!(!positioning.present);
        assert_eq!(positioning.raw_status.as_deref(), Some("BULLISH"));
        assert_relative_eq!(positioning.weighted_contribution, 0.0);
        assert_relative_eq!(evaluation.composite_score, 0.0);
    }

    #[test]
    fn test_unreadable_source_is_reported_distinctly() {
        let snapshot = Snapshot::new()
            .with(
                ids::FUND_FLOW,
                SourceReading::Unreadable {
                    reason: "permission denied".to_string(),
                },
            )
            .with_record(record(ids::TECHNICAL_TREND, "UPTREND"));

        let evaluation = engine().evaluate(&snapshot);
        let flow = evaluation.source(ids::FUND_FLOW).unwrap();
        assert!(matches!(flow.status, ContributionStatus::Unreadable { .. }));
        assert_relative_eq!(evaluation.composite_score, 3.0);
        assert_eq!(evaluation.band.name, "MODERATE_BULLISH");
    }

    #[test]
    fn test_min_sources_present() {
        let engine = Engine::new(EngineConfig::default().with_min_sources_present(2)).unwrap();
        let snapshot = Snapshot::new().with_record(record(ids::POSITIONING, "BULLISH"));

        let evaluation = engine.evaluate(&snapshot);
        assert_relative_eq!(evaluation.composite_score, 4.0);
        assert!(evaluation.is_indeterminate());
    }

    #[test]
    fn test_custom_bands() {
        let config = EngineConfig::default().with_bands(BandTable::symmetric(1.0, 5.0).unwrap());
        let engine = Engine::new(config).unwrap();
        let snapshot = Snapshot::new().with_record(record(ids::POSITIONING, "BULLISH"));

        assert_eq!(engine.evaluate(&snapshot).band.name, "MODERATE_BULLISH");
    }

    #[test]
    fn test_breakdown_follows_config_order() {
        let evaluation = engine().evaluate(&Snapshot::new());
        let order: Vec<&str> = evaluation
            .sources
            .iter()
            .map(|s| s.source_id.as_str())
            .collect();
        assert_eq!(order, [ids::POSITIONING, ids::FUND_FLOW, ids::TECHNICAL_TREND]);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
