//! Engine configuration.
//!
//! Weights, label vocabularies and band thresholds are data, not policy: an
//! [`EngineConfig`] is built once, validated, and handed to an
//! [`Engine`](crate::Engine). Several configurations may coexist, e.g. to
//! compare weight schemes side by side.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use warroom_combine::BandTable;
use warroom_signals::{SourceSpec, registry};
use warroom_traits::{Result, SourceId, WarRoomError};

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV: &str = "WARROOM_CONFIG";

const fn default_min_sources() -> usize {
    1
}

/// Configuration of the aggregation engine.
///
/// # Example
///
/// ```
/// use warroom::EngineConfig;
/// use warroom::signals::registry;
///
/// let config = EngineConfig::default().with_source(registry::sentiment());
/// assert_eq!(config.max_score(), 12.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Source table, in accumulation order
    pub sources: Vec<SourceSpec>,

    /// Band table, lowest band first
    #[serde(default)]
    pub bands: BandTable,

    /// Fewer present sources than this makes the verdict indeterminate
    #[serde(default = "default_min_sources")]
    pub min_sources_present: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sources: registry::default_sources(),
            bands: BandTable::default(),
            min_sources_present: default_min_sources(),
        }
    }
}

impl EngineConfig {
    /// Appends a source after the existing ones.
    #[must_use]
    pub fn with_source(mut self, spec: SourceSpec) -> Self {
        self.sources.push(spec);
        self
    }

    /// Replaces the band table.
    #[must_use]
    pub fn with_bands(mut self, bands: BandTable) -> Self {
        self.bands = bands;
        self
    }

    /// Sets the minimum number of present sources for a determinate verdict.
    #[must_use]
    pub const fn with_min_sources_present(mut self, min: usize) -> Self {
        self.min_sources_present = min;
        self
    }

    /// Sum of all source weights: the largest attainable absolute score.
    pub fn max_score(&self) -> f64 {
        self.sources.iter().map(|s| s.weight).sum()
    }

    /// Identifiers of the configured sources, in accumulation order.
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.sources.iter().map(|s| s.id.clone()).collect()
    }

    /// Returns the definition of a configured source.
    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.iter().find(|s| s.id.as_str() == id)
    }

    /// Checks the whole configuration.
    ///
    /// The band table validates itself on construction, so this covers the
    /// source table and the coverage requirement.
    ///
    /// # Errors
    ///
    /// Returns [`WarRoomError::Configuration`] if the source table is empty,
    /// contains an invalid or duplicate source, its weights overflow when
    /// summed, or `min_sources_present` is zero or larger than the number of
    /// sources.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(WarRoomError::config("no sources configured"));
        }

        let mut seen = HashSet::new();
        for spec in &self.sources {
            spec.validate()?;
            if !seen.insert(spec.id.as_str()) {
                return Err(WarRoomError::config(format!(
                    "source '{}' is configured twice",
                    spec.id
                )));
            }
        }

        if !self.max_score().is_finite() {
            return Err(WarRoomError::config(
                "source weights add up to more than a finite score can hold",
            ));
        }

        if self.min_sources_present == 0 || self.min_sources_present > self.sources.len() {
            return Err(WarRoomError::config(format!(
                "min_sources_present must be between 1 and {}, got {}",
                self.sources.len(),
                self.min_sources_present
            )));
        }

        Ok(())
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the configuration invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
