//! Best-effort storage of the `(sites, history)` pair.

mod gateway;
mod kv;

pub use gateway::{Checkpoint, NoCheckpoint, PersistenceGateway, Snapshot};
pub use kv::{FileKvStore, KvError, KvStore, MemoryKvStore};

use thiserror::Error;

/// Key holding the JSON array of sites.
pub const SITES_KEY: &str = "ff_sites_clean_sites";

/// Key holding the JSON array of ledger entries.
pub const HISTORY_KEY: &str = "ff_sites_clean_history";

/// Failures the gateway absorbs. They are reported through `tracing` and never leave
/// [`PersistenceGateway::load`] or [`PersistenceGateway::save`].
#[derive(Error, Debug)]
pub enum PersistenceError {
	#[error("stored value for '{key}' is corrupt: {source}")]
	Corrupt {
		key: &'static str,
		#[source]
		source: serde_json::Error,
	},
	#[error("failed to read '{key}': {source}")]
	ReadFailed {
		key: &'static str,
		#[source]
		source: KvError,
	},
	#[error("failed to write '{key}': {source}")]
	WriteFailed {
		key: &'static str,
		#[source]
		source: KvError,
	},
	#[error("failed to encode '{key}': {source}")]
	Encode {
		key: &'static str,
		#[source]
		source: serde_json::Error,
	},
}
