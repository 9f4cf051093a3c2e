//! Record command implementation.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde_json::Value;
use warroom::signals::{SourceSpec, normalize, registry};
use warroom::store::JsonFileStore;
use warroom::traits::{SignalRecord, SourceReading};
use warroom::{EngineConfig, RecordStore, WarRoomError};

/// Parses `name=value`; values that are not valid JSON are kept as strings.
pub(crate) fn parse_field(arg: &str) -> Result<(String, Value)> {
    let Some((name, raw)) = arg.split_once('=') else {
        bail!("field '{}' is not of the form NAME=VALUE", arg);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("field '{}' has an empty name", arg);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}

fn parse_timestamp(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(at) => Ok(DateTime::parse_from_rfc3339(at)
            .with_context(|| format!("invalid timestamp '{}'", at))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

/// Finds the definition of `source`, falling back to the built-in sources so
/// that an opt-in source can be recorded before it is configured. The flag is
/// `true` when the source is part of `config`.
pub(crate) fn resolve_source(config: &EngineConfig, source: &str) -> Result<(SourceSpec, bool)> {
    if let Some(spec) = config.source(source) {
        return Ok((spec.clone(), true));
    }
    registry::get_builtin(source)
        .map(|spec| (spec, false))
        .ok_or_else(|| WarRoomError::UnknownSource(source.to_string()).into())
}

/// Store one record as the latest of `source` and show how it would count.
pub(crate) async fn store_record(
    config: &EngineConfig,
    store: &JsonFileStore,
    source: &str,
    status: Option<String>,
    fields: &[String],
    at: Option<&str>,
) -> Result<()> {
    let (spec, configured) = resolve_source(config, source)?;

    let mut record = SignalRecord::new(spec.id.clone(), parse_timestamp(at)?);
    if let Some(status) = status {
        record = record.with_status(status);
    }
    for field in fields {
        let (name, value) = parse_field(field)?;
        record = record.with_field(name, value);
    }

    let contribution = normalize(&spec, &SourceReading::Record(record.clone()));
    store.put(record).await?;

    println!(
        "Stored {} record in {}",
        spec.id,
        store.path_for(&spec.id)?.display()
    );
    if !configured {
        println!("  built-in source not in the current configuration; it will not be scored");
    }
    if contribution.is_present() {
        println!(
            "  direction {:+.2} x weight {:.1} = {:+.2}",
            contribution.direction,
            spec.weight,
            contribution.direction * spec.weight
        );
    } else {
        println!("  counts as absent: {:?}", contribution.status);
    }

    Ok(())
}
