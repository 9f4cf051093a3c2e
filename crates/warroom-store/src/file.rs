//! Directory of JSON files, one per source.

use std::env;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use warroom_traits::{RecordStore, Result, SignalRecord, SourceId, SourceReading, WarRoomError};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "WARROOM_DATA_DIR";

/// Directory used when [`DATA_DIR_ENV`] is not set.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Stores the latest record of each source as `<dir>/<source_id>.json`.
///
/// Every write goes to its own temporary file that is then renamed over the
/// previous record, so a concurrent reader sees either the old or the new
/// record and never a partial one, and concurrent writers do not collide.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store from the `WARROOM_DATA_DIR` environment variable.
    ///
    /// This will also load from a `.env` file if present, and falls back to
    /// `./data` when the variable is unset.
    #[must_use]
    pub fn from_env() -> Self {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::new(dir)
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `source`'s record.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is not a plain file stem.
    pub fn path_for(&self, source: &SourceId) -> Result<PathBuf> {
        let id = source.as_str();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(WarRoomError::Other(format!(
                "source id '{id}' cannot be used as a file name"
            )));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    async fn read(&self, source: &SourceId) -> Result<Option<SignalRecord>> {
        let path = self.path_for(source)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: SignalRecord = serde_json::from_slice(&bytes)?;
        if record.source_id != *source {
            return Err(WarRoomError::SourceUnavailable {
                source_id: source.to_string(),
                reason: format!(
                    "{} holds a record for '{}'",
                    path.display(),
                    record.source_id
                ),
            });
        }
        Ok(Some(record))
    }
}

impl RecordStore for JsonFileStore {
    async fn latest(&self, source: &SourceId) -> SourceReading {
        match self.read(source).await {
            Ok(Some(record)) => {
                debug!(%source, timestamp = %record.timestamp, "loaded record");
                SourceReading::Record(record)
            }
            Ok(None) => {
                debug!(%source, "no record on disk");
                SourceReading::Missing
            }
            Err(e) => {
                warn!(%source, error = %e, "record unreadable");
                SourceReading::Unreadable {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn put(&self, record: SignalRecord) -> Result<()> {
        let path = self.path_for(&record.source_id)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        // Each write gets its own temp file so concurrent writers of one
        // source never share a path; the last rename wins.
        let bytes = serde_json::to_vec_pretty(&record)?;
        let dir = self.dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.as_file().sync_all()?;
            tmp.persist(&target)?;
            Ok(())
        })
        .await
        .map_err(|e| WarRoomError::Other(format!("record write task failed: {e}")))??;

        debug!(source = %record.source_id, path = %path.display(), "stored record");
        Ok(())
    }
}
