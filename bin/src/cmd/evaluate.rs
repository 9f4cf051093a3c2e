//! Evaluate command implementation.

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use warroom::store::JsonFileStore;
use warroom::{Engine, EngineConfig};

use crate::Format;
use crate::report::render_text;

/// Evaluate the latest records in `store` and print the report.
pub(crate) async fn run_evaluate(
    config: EngineConfig,
    store: &JsonFileStore,
    format: Format,
) -> Result<()> {
    let engine = Engine::new(config)?;
    info!(dir = %store.dir().display(), "reading latest records");

    let evaluation = engine.evaluate_store(store).await;

    match format {
        Format::Text => println!(
            "{}",
            render_text(&evaluation, &engine.config().bands, Utc::now())
        ),
        Format::Json => println!("{}", evaluation.to_json()?),
    }

    Ok(())
}
