use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{
	domain::{LedgerEntry, Site},
	ledger::Ledger,
	registry::SiteRegistry,
};

use super::{KvStore, PersistenceError, HISTORY_KEY, SITES_KEY};

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
	pub sites: Vec<Site>,
	pub history: Vec<LedgerEntry>,
}

/// Called by the resolver at its commit points. Implementations must not fail the
/// transaction.
pub trait Checkpoint {
	fn checkpoint(&mut self, registry: &SiteRegistry, ledger: &Ledger);
}

/// Checkpoint that persists nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheckpoint;

impl Checkpoint for NoCheckpoint {
	fn checkpoint(&mut self, _registry: &SiteRegistry, _ledger: &Ledger) {}
}

/// Reads and writes the two collections under their fixed keys.
///
/// Neither direction ever fails past this boundary: a missing or corrupt collection loads as
/// empty, a failed write is logged and dropped.
#[derive(Debug)]
pub struct PersistenceGateway<S> {
	store: S,
}

impl<S: KvStore> PersistenceGateway<S> {
	pub const fn new(store: S) -> Self {
		Self { store }
	}

	pub const fn store(&self) -> &S {
		&self.store
	}

	pub fn into_inner(self) -> S {
		self.store
	}

	pub fn load(&self) -> Snapshot {
		let sites = self.load_collection::<Site>(SITES_KEY).unwrap_or_else(|e| {
			warn!(error = %e, "discarding stored sites");
			Vec::new()
		});
		let history = self
			.load_collection::<LedgerEntry>(HISTORY_KEY)
			.unwrap_or_else(|e| {
				warn!(error = %e, "discarding stored history");
				Vec::new()
			});

		debug!(
			sites = sites.len(),
			entries = history.len(),
			"loaded persisted state"
		);

		Snapshot { sites, history }
	}

	fn load_collection<T: DeserializeOwned>(
		&self,
		key: &'static str,
	) -> Result<Vec<T>, PersistenceError> {
		let Some(raw) = self
			.store
			.get(key)
			.map_err(|source| PersistenceError::ReadFailed { key, source })?
		else {
			return Ok(Vec::new());
		};

		serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt { key, source })
	}

	/// Writes both collections, reporting the first failure.
	pub fn try_save(
		&mut self,
		sites: &[Site],
		history: &[LedgerEntry],
	) -> Result<(), PersistenceError> {
		self.save_collection(SITES_KEY, sites)?;
		self.save_collection(HISTORY_KEY, history)
	}

	/// Best effort [`Self::try_save`].
	pub fn save(&mut self, sites: &[Site], history: &[LedgerEntry]) {
		if let Err(e) = self.try_save(sites, history) {
			warn!(error = %e, "failed to persist state; continuing in memory");
		}
	}

	fn save_collection<T: Serialize>(
		&mut self,
		key: &'static str,
		values: &[T],
	) -> Result<(), PersistenceError> {
		let raw = serde_json::to_string(values)
			.map_err(|source| PersistenceError::Encode { key, source })?;

		self.store
			.set(key, &raw)
			.map_err(|source| PersistenceError::WriteFailed { key, source })
	}

	/// Removes both keys. Failures are logged.
	pub fn clear(&mut self) {
		for key in [SITES_KEY, HISTORY_KEY] {
			if let Err(e) = self.store.remove(key) {
				warn!(key, error = %e, "failed to remove stored collection");
			}
		}
	}
}

impl<S: KvStore> Checkpoint for PersistenceGateway<S> {
	fn checkpoint(&mut self, registry: &SiteRegistry, ledger: &Ledger) {
		self.save(registry.sites(), ledger.entries());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		domain::{Action, Coordinates},
		persistence::{KvError, MemoryKvStore},
	};

	use pretty_assertions::assert_eq;
	use tracing_test::traced_test;

	struct ReadOnlyStore;

	impl KvStore for ReadOnlyStore {
		fn get(&self, _key: &str) -> Result<Option<String>, KvError> {
			Ok(None)
		}

		fn set(&mut self, _key: &str, _value: &str) -> Result<(), KvError> {
			Err(KvError::Unavailable("read-only".to_string()))
		}

		fn remove(&mut self, _key: &str) -> Result<(), KvError> {
			Err(KvError::Unavailable("read-only".to_string()))
		}
	}

	#[test]
	fn save_then_load_restores_state() {
		let mut registry = SiteRegistry::new();
		let mut ledger = Ledger::new();
		let site = registry
			.upsert_by_location(Coordinates::new(59.2, 9.6).unwrap(), Some("North pad"))
			.id()
			.clone();
		let site = registry.apply_delta(&site, Action::Deposit, 5).unwrap();
		ledger.append(LedgerEntry::snapshot(
			1_700_000_000_000,
			Action::Deposit,
			"crew".to_string(),
			5,
			site,
		));

		let mut gateway = PersistenceGateway::new(MemoryKvStore::default());
		gateway.checkpoint(&registry, &ledger);

		let snapshot = gateway.load();
		assert_eq!(snapshot.sites, registry.sites());
		assert_eq!(snapshot.history, ledger.entries());
	}

	#[test]
	#[traced_test]
	fn corrupt_collection_loads_empty_without_touching_the_other() {
		let gateway = PersistenceGateway::new(MemoryKvStore::with_values([
			(SITES_KEY, "{not json"),
			(HISTORY_KEY, "[]"),
		]));

		assert_eq!(gateway.load(), Snapshot::default());
		assert!(logs_contain("discarding stored sites"));
		assert!(!logs_contain("discarding stored history"));
	}

	#[test]
	#[traced_test]
	fn failed_writes_are_swallowed() {
		let mut gateway = PersistenceGateway::new(ReadOnlyStore);

		gateway.save(&[], &[]);
		gateway.clear();

		assert!(gateway.try_save(&[], &[]).is_err());
		assert!(logs_contain("failed to persist state"));
	}
}
