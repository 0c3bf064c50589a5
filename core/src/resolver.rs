//! The single deposit/withdraw transaction.

use std::fmt;

use tracing::{info, instrument};

use crate::{
	domain::{coerce_quantity, Coordinates, LedgerEntry, OperationRequest, Site, Timestamp},
	error::{CoreError, Result},
	ledger::Ledger,
	persistence::Checkpoint,
	registry::SiteRegistry,
};

/// Source of ledger timestamps.
pub trait Clock: Send + Sync {
	fn now_ms(&self) -> Timestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now_ms(&self) -> Timestamp {
		chrono::Utc::now().timestamp_millis()
	}
}

/// Clock stuck at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
	fn now_ms(&self) -> Timestamp {
		self.0
	}
}

/// The committed state of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
	/// The site after the inventory change.
	pub site: Site,
	pub entry: LedgerEntry,
}

pub struct OperationResolver {
	clock: Box<dyn Clock>,
}

impl fmt::Debug for OperationResolver {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OperationResolver").finish_non_exhaustive()
	}
}

impl Default for OperationResolver {
	fn default() -> Self {
		Self::new(SystemClock)
	}
}

impl OperationResolver {
	pub fn new(clock: impl Clock + 'static) -> Self {
		Self {
			clock: Box::new(clock),
		}
	}

	/// Runs the whole transaction: validate, upsert the site, apply the delta, append to the
	/// ledger.
	///
	/// Validation happens up front, so an error leaves `registry` and `ledger` exactly as they
	/// were. `checkpoint` is called after the registry commit and again after the ledger
	/// append; it cannot fail the operation.
	#[instrument(
		skip(self, registry, ledger, checkpoint, request),
		fields(action = %request.action),
		err
	)]
	pub fn resolve(
		&self,
		registry: &mut SiteRegistry,
		ledger: &mut Ledger,
		checkpoint: &mut impl Checkpoint,
		request: OperationRequest,
	) -> Result<Resolution> {
		let OperationRequest {
			action,
			operator,
			qty,
			name,
			lat,
			lng,
		} = request;

		let operator = operator.trim();
		if operator.is_empty() {
			return Err(CoreError::MissingOperator);
		}

		let point = Coordinates::from_parts(lat, lng).ok_or(CoreError::MissingCoordinates)?;
		let qty = coerce_quantity(qty);

		let site_id = registry
			.upsert_by_location(point, name.as_deref())
			.id()
			.clone();
		let site = registry.apply_delta(&site_id, action, qty)?.clone();
		checkpoint.checkpoint(registry, ledger);

		let ts = ledger.stamp(self.clock.now_ms());
		let entry = ledger
			.append(LedgerEntry::snapshot(
				ts,
				action,
				operator.to_string(),
				qty,
				&site,
			))
			.clone();
		checkpoint.checkpoint(registry, ledger);

		info!(
			site_id = %site.id(),
			qty,
			operator,
			barrels = site.barrels(),
			"operation committed"
		);

		Ok(Resolution { site, entry })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{domain::Action, persistence::NoCheckpoint};

	#[derive(Default)]
	struct CountingCheckpoint {
		calls: Vec<(usize, usize)>,
	}

	impl Checkpoint for CountingCheckpoint {
		fn checkpoint(&mut self, registry: &SiteRegistry, ledger: &Ledger) {
			self.calls.push((registry.len(), ledger.len()));
		}
	}

	#[test]
	fn checkpoints_after_each_commit() {
		let resolver = OperationResolver::new(FixedClock(42));
		let mut registry = SiteRegistry::new();
		let mut ledger = Ledger::new();
		let mut checkpoint = CountingCheckpoint::default();

		let resolution = resolver
			.resolve(
				&mut registry,
				&mut ledger,
				&mut checkpoint,
				OperationRequest::new(Action::Deposit, " crew ").qty(5).at(59.2, 9.6),
			)
			.unwrap();

		assert_eq!(checkpoint.calls, [(1, 0), (1, 1)]);
		assert_eq!(resolution.entry.ts(), 42);
		assert_eq!(resolution.entry.operator(), "crew");
		assert_eq!(resolution.site.barrels(), 5);
	}

	#[test]
	fn validation_errors_leave_state_untouched() {
		let resolver = OperationResolver::new(FixedClock(0));
		let mut registry = SiteRegistry::new();
		let mut ledger = Ledger::new();
		let mut checkpoint = CountingCheckpoint::default();

		let missing_operator = OperationRequest::new(Action::Deposit, "   ").at(59.2, 9.6);
		let missing_coordinates = OperationRequest::new(Action::Deposit, "crew").qty(2);
		let out_of_range = OperationRequest::new(Action::Withdraw, "crew").at(95.0, 9.6);

		assert!(matches!(
			resolver.resolve(&mut registry, &mut ledger, &mut checkpoint, missing_operator),
			Err(CoreError::MissingOperator)
		));
		assert!(matches!(
			resolver.resolve(&mut registry, &mut ledger, &mut checkpoint, missing_coordinates),
			Err(CoreError::MissingCoordinates)
		));
		assert!(matches!(
			resolver.resolve(&mut registry, &mut ledger, &mut checkpoint, out_of_range),
			Err(CoreError::MissingCoordinates)
		));

		assert!(registry.is_empty());
		assert!(ledger.is_empty());
		assert!(checkpoint.calls.is_empty());
	}

	#[test]
	fn entry_snapshots_the_site_after_the_change() {
		let resolver = OperationResolver::new(FixedClock(1));
		let mut registry = SiteRegistry::new();
		let mut ledger = Ledger::new();

		resolver
			.resolve(
				&mut registry,
				&mut ledger,
				&mut NoCheckpoint,
				OperationRequest::new(Action::Deposit, "crew").at(59.2, 9.6),
			)
			.unwrap();
		let resolution = resolver
			.resolve(
				&mut registry,
				&mut ledger,
				&mut NoCheckpoint,
				OperationRequest::new(Action::Withdraw, "crew")
					.qty(-3)
					.name("Renamed")
					.at(59.2, 9.6),
			)
			.unwrap();

		assert_eq!(resolution.entry.qty(), 1);
		assert_eq!(resolution.entry.site_name(), "Renamed");
		assert_eq!(ledger.entries()[0].site_name(), "");
		assert_eq!(resolution.site.barrels(), 0);
	}
}
