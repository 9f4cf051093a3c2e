//! Console rendering of an evaluation.

use chrono::{DateTime, TimeDelta, Utc};
use warroom::signals::ContributionStatus;
use warroom::{BandTable, Evaluation, SourceBreakdown};

/// Compact age such as `45s`, `12m`, `3h` or `2d`.
pub(crate) fn format_age(age: TimeDelta) -> String {
    let secs = age.num_seconds();
    if secs < 0 {
        return "future".to_string();
    }
    match secs {
        0..60 => format!("{}s", secs),
        60..3_600 => format!("{}m", secs / 60),
        3_600..86_400 => format!("{}h", secs / 3_600),
        _ => format!("{}d", secs / 86_400),
    }
}

fn status_cell(source: &SourceBreakdown) -> String {
    match &source.status {
        ContributionStatus::Present => "present".to_string(),
        ContributionStatus::Missing => "absent (no record)".to_string(),
        ContributionStatus::Unreadable { reason } => format!("absent (unreadable: {})", reason),
        ContributionStatus::MalformedField { field, .. } => {
            format!("absent (bad field '{}')", field)
        }
    }
}

fn source_line(source: &SourceBreakdown, now: DateTime<Utc>) -> String {
    let label = source.raw_status.as_deref().unwrap_or("-");
    let age = source
        .timestamp
        .map_or_else(|| "-".to_string(), |ts| format_age(now - ts));
    let contribution = if source.present {
        format!("{:+6.2}", source.weighted_contribution)
    } else {
        format!("{:>6}", "-")
    };

    format!(
        "  {:18} {:>4.1}  {:14} {}  {:>6}  {}",
        source.source_id.as_str(),
        source.weight,
        label,
        contribution,
        age,
        status_cell(source)
    )
}

/// Renders the per-source breakdown and the verdict.
pub(crate) fn render_text(evaluation: &Evaluation, bands: &BandTable, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        String::new(),
        "╔══════════════════════════════════════════════════════════════╗".to_string(),
        "║                         War Room                             ║".to_string(),
        "╚══════════════════════════════════════════════════════════════╝".to_string(),
        String::new(),
        format!(
            "  {:18} {:>4}  {:14} {:>6}  {:>6}  {}",
            "Source", "Wt", "Label", "Contr", "Age", "Status"
        ),
        format!("  {}", "-".repeat(70)),
    ];
    lines.extend(evaluation.sources.iter().map(|s| source_line(s, now)));
    lines.push(String::new());

    lines.push(format!(
        "Composite score: {:+.2} / ±{:.1}  (based on {} sources)",
        evaluation.composite_score,
        evaluation.max_score,
        evaluation.coverage()
    ));

    if evaluation.is_indeterminate() {
        lines.push(
            "Verdict:         INDETERMINATE, too few sources present to assess the market"
                .to_string(),
        );
    } else {
        let interval = bands
            .bands()
            .iter()
            .position(|b| b.name == evaluation.band.name)
            .and_then(|i| bands.interval(i))
            .map(|i| format!(" {}", i))
            .unwrap_or_default();
        lines.push(format!("Verdict:         {}{}", evaluation.band.name, interval));
        lines.push(format!("Action:          {}", evaluation.band.directive));
    }
    lines.push(String::new());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use warroom::traits::{FundFlow, Snapshot};
    use warroom::{Engine, EngineConfig};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 8, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(TimeDelta::seconds(42)), "42s");
        assert_eq!(format_age(TimeDelta::minutes(90)), "1h");
        assert_eq!(format_age(TimeDelta::days(3)), "3d");
        assert_eq!(format_age(TimeDelta::seconds(-5)), "future");
    }

    #[test]
    fn test_render_partial_coverage() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let record = FundFlow::from_change(229.1, 231.0, 6_200_000)
            .into_record(Utc.with_ymd_and_hms(2024, 11, 8, 16, 30, 0).unwrap());
        let evaluation = engine.evaluate(&Snapshot::new().with_record(record));

        let text = render_text(&evaluation, &engine.config().bands, now());
        assert!(text.contains("based on 1/3 sources"));
        assert!(text.contains("MODERATE_BEARISH [-7, -3]"));
        assert!(text.contains("absent (no record)"));
        assert!(text.contains("1h"));
    }

    #[test]
    fn test_render_indeterminate() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let evaluation = engine.evaluate(&Snapshot::new());

        let text = render_text(&evaluation, &engine.config().bands, now());
        assert!(text.contains("INDETERMINATE"));
        assert!(!text.contains("Action:"));
    }
}
