//! Config command implementation.

use std::path::Path;

use anyhow::Result;
use warroom::EngineConfig;

/// Print the effective configuration, or only confirm it is valid.
pub(crate) fn show_config(config: &EngineConfig, path: Option<&Path>, check: bool) -> Result<()> {
    config.validate()?;

    if check {
        let origin = path.map_or_else(
            || "built-in defaults".to_string(),
            |p| p.display().to_string(),
        );
        println!(
            "Configuration OK ({}): {} sources, {} bands, max score ±{:.1}",
            origin,
            config.sources.len(),
            config.bands.bands().len(),
            config.max_score()
        );
        return Ok(());
    }

    println!("{}", config.to_json()?);
    Ok(())
}
