//! Record stores for warroom.
//!
//! Upstream collaborators (price trackers, ETF flow scrapers, COT report
//! parsers, news sentiment jobs) each overwrite their latest record here on
//! their own schedule. The engine side reads one [`Snapshot`] per evaluation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use warroom_store::JsonFileStore;
//! use warroom_traits::{RecordStore, Positioning};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = JsonFileStore::from_env();
//!
//!     let record = Positioning {
//!         net_position: 182_340.0,
//!         status_label: "BULLISH".to_string(),
//!     }
//!     .into_record(chrono::Utc::now());
//!     store.put(record).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `WARROOM_DATA_DIR` in your environment or `.env` file:
//!
//! ```bash
//! WARROOM_DATA_DIR=/var/lib/warroom
//! ```
//!
//! [`Snapshot`]: warroom_traits::Snapshot

mod file;
mod memory;

pub use file::{DATA_DIR_ENV, DEFAULT_DATA_DIR, JsonFileStore};
pub use memory::MemoryStore;
