//! Maps a source's latest reading onto a bounded direction.

use serde::{Deserialize, Serialize};
use warroom_traits::{SourceId, SourceReading, WarRoomError};

use crate::registry::SourceSpec;

/// Why a source does or does not count toward the composite score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContributionStatus {
    /// The record was read and its required fields parsed.
    Present,
    /// The source never produced a record.
    Missing,
    /// A record exists but could not be read.
    Unreadable {
        /// Cause reported by the store.
        reason: String,
    },
    /// A required numeric field is missing or not a finite number.
    MalformedField {
        /// Offending field.
        field: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Direction of one source after normalization.
///
/// Never stored; recomputed from the snapshot on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedContribution {
    /// Source this contribution belongs to.
    pub source_id: SourceId,
    /// Signed lean in `[-1, 1]`; always `0.0` for an absent source.
    pub direction: f64,
    /// Presence of the source and, if absent, why.
    pub status: ContributionStatus,
    /// Pattern of the rule that produced `direction`, if a rule matched.
    pub matched_rule: Option<String>,
}

impl NormalizedContribution {
    fn absent(source_id: SourceId, status: ContributionStatus) -> Self {
        Self {
            source_id,
            direction: 0.0,
            status,
            matched_rule: None,
        }
    }

    /// Returns whether the source counts toward the composite score.
    pub const fn is_present(&self) -> bool {
        matches!(self.status, ContributionStatus::Present)
    }
}

/// Normalizes one reading against its source spec.
///
/// Pure: the result depends only on the arguments. Per-source problems are
/// folded into the returned status rather than reported as errors.
///
/// Resolution order for a present record:
/// 1. every required field must parse as a finite number;
/// 2. a [`ScoreScale`](crate::registry::ScoreScale) maps its field linearly;
/// 3. otherwise the first label rule contained in the status decides;
/// 4. no matching rule, or no label at all, is a neutral `0.0`.
pub fn normalize(spec: &SourceSpec, reading: &SourceReading) -> NormalizedContribution {
    let source_id = spec.id.clone();

    let record = match reading {
        SourceReading::Record(record) => record,
        SourceReading::Missing => {
            return NormalizedContribution::absent(source_id, ContributionStatus::Missing);
        }
        SourceReading::Unreadable { reason } => {
            return NormalizedContribution::absent(
                source_id,
                ContributionStatus::Unreadable {
                    reason: reason.clone(),
                },
            );
        }
    };

    if record.source_id != spec.id {
        return NormalizedContribution::absent(
            source_id,
            ContributionStatus::Unreadable {
                reason: format!("record belongs to source '{}'", record.source_id),
            },
        );
    }

    let scale_field = spec.scale.as_ref().map(|scale| scale.field.as_str());
    for field in spec.required_fields.iter().map(String::as_str).chain(scale_field) {
        if let Err(err) = record.numeric_field(field) {
            let reason = match err {
                WarRoomError::MalformedField { reason, .. } => reason,
                other => other.to_string(),
            };
            return NormalizedContribution::absent(
                source_id,
                ContributionStatus::MalformedField {
                    field: field.to_string(),
                    reason,
                },
            );
        }
    }

    let (direction, matched_rule) = if let Some(scale) = &spec.scale {
        // Checked above.
        let value = record.numeric_field(&scale.field).unwrap_or(scale.neutral);
        (scale.direction(value), None)
    } else {
        record
            .status()
            .and_then(|label| spec.match_label(label))
            .map_or((0.0, None), |rule| {
                (rule.direction, Some(rule.pattern.clone()))
            })
    };

    NormalizedContribution {
        source_id,
        direction,
        status: ContributionStatus::Present,
        matched_rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{fund_flow, positioning, sentiment, technical_trend};
    use approx::assert_relative_eq;
    use chrono::Utc;
    use warroom_traits::{SignalRecord, ids};

    fn flow(status: &str) -> SourceReading {
        SignalRecord::new(ids::FUND_FLOW, Utc::now())
            .with_status(status)
            .with_field("price", 231.2)
            .with_field("volume", 5_000_000)
            .into()
    }

    #[test]
    fn test_missing_and_unreadable_are_absent() {
        let spec = fund_flow();

        let missing = normalize(&spec, &SourceReading::Missing);
        assert!(!missing.is_present());
        assert_relative_eq!(missing.direction, 0.0);

        let unreadable = normalize(
            &spec,
            &SourceReading::Unreadable {
                reason: "bad json".to_string(),
            },
        );
        assert!(!unreadable.is_present());
        assert!(matches!(
            unreadable.status,
            ContributionStatus::Unreadable { .. }
        ));
    }

    #[test]
    fn test_label_rules() {
        let spec = fund_flow();

        let buy = normalize(&spec, &flow("🟢 BUY (accumulating)"));
        assert!(buy.is_present());
        assert_relative_eq!(buy.direction, 1.0);
        assert_eq!(buy.matched_rule.as_deref(), Some("BUY"));

        let sell = normalize(&spec, &flow("🔴 sell"));
        assert_relative_eq!(sell.direction, -1.0);
    }

    #[test]
    fn test_unmatched_label_is_neutral_but_present() {
        let neutral = normalize(&fund_flow(), &flow("HOLD"));
        assert!(neutral.is_present());
        assert_relative_eq!(neutral.direction, 0.0);
        assert!(neutral.matched_rule.is_none());
    }

    #[test]
    fn test_malformed_field_degrades_to_absent() {
        let reading: SourceReading = SignalRecord::new(ids::POSITIONING, Utc::now())
            .with_status("BULLISH")
            .with_field("net_position", "lots")
            .into();

        let contribution = normalize(&positioning(), &reading);
        assert!(!contribution.is_present());
        assert_relative_eq!(contribution.direction, 0.0);
        match contribution.status {
            ContributionStatus::MalformedField { field, .. } => assert_eq!(field, "net_position"),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn test_missing_required_field_degrades_to_absent() {
        let reading: SourceReading = SignalRecord::new(ids::TECHNICAL_TREND, Utc::now())
            .with_status("UPTREND")
            .into();

        assert!(!normalize(&technical_trend(), &reading).is_present());
    }

    #[test]
    fn test_fractional_trend() {
        let reading: SourceReading = SignalRecord::new(ids::TECHNICAL_TREND, Utc::now())
            .with_status("CORRECTION (short-term pullback)")
            .with_field("price", 2641.0)
            .into();

        let contribution = normalize(&technical_trend(), &reading);
        assert_relative_eq!(contribution.direction, -1.0 / 3.0);
    }

    #[test]
    fn test_scaled_source() {
        let reading: SourceReading = SignalRecord::new(ids::SENTIMENT, Utc::now())
            .with_status("BEARISH headline, ignored for scaled sources")
            .with_field("score", 80)
            .into();

        let contribution = normalize(&sentiment(), &reading);
        assert!(contribution.is_present());
        assert_relative_eq!(contribution.direction, 0.6);
        assert!(contribution.matched_rule.is_none());
    }

    #[test]
    fn test_record_from_other_source_is_rejected() {
        let contribution = normalize(&positioning(), &flow("BUY"));
        assert!(!contribution.is_present());
    }

    #[test]
    fn test_normalize_is_pure() {
        let reading = flow("BUY");
        assert_eq!(
            normalize(&fund_flow(), &reading),
            normalize(&fund_flow(), &reading)
        );
    }
}
