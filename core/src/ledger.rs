//! Append-only operation history.

use tracing::debug;

use crate::domain::{LedgerEntry, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
	Ascending,
	#[default]
	Descending,
}

/// Append-only list of [`LedgerEntry`] records.
///
/// Entries are never edited or removed one by one; [`Ledger::clear`] exists only for the full
/// reset. Timestamps handed out by [`Ledger::stamp`] never go backwards within a session, even
/// if the wall clock does. Restored entries do not raise that floor, so a skewed timestamp from
/// an earlier session cannot leak into new entries.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
	entries: Vec<LedgerEntry>,
	high_water: Timestamp,
}

impl Ledger {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Restores a ledger from persisted entries, in their stored order.
	#[must_use]
	pub fn from_entries(entries: Vec<LedgerEntry>) -> Self {
		Self {
			entries,
			high_water: Timestamp::MIN,
		}
	}

	/// Timestamp for the next entry: `now`, or the latest timestamp seen so far if the clock
	/// moved backwards.
	pub fn stamp(&mut self, now: Timestamp) -> Timestamp {
		self.high_water = self.high_water.max(now);
		self.high_water
	}

	/// Appends `entry`. Its timestamp becomes the floor for later [`Ledger::stamp`] calls.
	pub fn append(&mut self, entry: LedgerEntry) -> &LedgerEntry {
		self.high_water = self.high_water.max(entry.ts());
		debug!(
			site_id = %entry.site_id(),
			action = %entry.action(),
			qty = entry.qty(),
			ts = entry.ts(),
			"ledger append"
		);
		self.entries.push(entry);

		&self.entries[self.entries.len() - 1]
	}

	/// Entries in insertion order.
	#[must_use]
	pub fn entries(&self) -> &[LedgerEntry] {
		&self.entries
	}

	/// Entries sorted by timestamp. Equal timestamps keep insertion order.
	#[must_use]
	pub fn entries_by_time(&self, order: Order) -> Vec<&LedgerEntry> {
		let mut sorted = self.entries.iter().collect::<Vec<_>>();

		match order {
			Order::Ascending => sorted.sort_by_key(|entry| entry.ts()),
			Order::Descending => sorted.sort_by(|a, b| b.ts().cmp(&a.ts())),
		}

		sorted
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Wipes the whole history. Only the full reset calls this.
	pub(crate) fn clear(&mut self) {
		self.entries.clear();
		self.high_water = Timestamp::MIN;
	}
}
