//! The set of known depot sites and their inventory.

use tracing::{debug, info};

use crate::{
	domain::{Action, Coordinates, Site, SiteId},
	error::{CoreError, Result},
	geo::{self, MATCH_THRESHOLD_M},
};

/// Owns every [`Site`] in insertion order.
///
/// New sites are only ever created through [`SiteRegistry::upsert_by_location`], which checks
/// for an existing site within the match threshold first, so no two sites created here end up
/// closer to each other than that threshold.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
	sites: Vec<Site>,
	match_threshold_m: f64,
}

impl Default for SiteRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl SiteRegistry {
	#[must_use]
	pub fn new() -> Self {
		Self::with_threshold(MATCH_THRESHOLD_M)
	}

	#[must_use]
	pub const fn with_threshold(match_threshold_m: f64) -> Self {
		Self {
			sites: Vec::new(),
			match_threshold_m,
		}
	}

	/// Restores a registry from previously persisted sites, keeping their order.
	#[must_use]
	pub fn from_sites(sites: Vec<Site>, match_threshold_m: f64) -> Self {
		Self {
			sites,
			match_threshold_m,
		}
	}

	#[must_use]
	pub const fn match_threshold_m(&self) -> f64 {
		self.match_threshold_m
	}

	#[must_use]
	pub fn sites(&self) -> &[Site] {
		&self.sites
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.sites.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.sites.is_empty()
	}

	#[must_use]
	pub fn get(&self, id: &SiteId) -> Option<&Site> {
		self.sites.iter().find(|site| site.id() == id)
	}

	fn position(&self, id: &SiteId) -> Result<usize> {
		self.sites
			.iter()
			.position(|site| site.id() == id)
			.ok_or_else(|| CoreError::SiteNotFound(id.clone()))
	}

	/// Nearest site strictly closer than `threshold_m`.
	#[must_use]
	pub fn nearest(&self, point: Coordinates, threshold_m: f64) -> Option<&Site> {
		geo::nearest(&self.sites, point, threshold_m)
	}

	fn nearest_index(&self, point: Coordinates, threshold_m: f64) -> Option<usize> {
		let id = self.nearest(point, threshold_m)?.id();

		self.sites.iter().position(|site| site.id() == id)
	}

	/// Returns the site matching `point`, creating an empty one when nothing is close enough.
	///
	/// An existing site is renamed only when `name` is non-empty after trimming and differs
	/// from its current name.
	pub fn upsert_by_location(&mut self, point: Coordinates, name: Option<&str>) -> &Site {
		let name = name.map(str::trim).filter(|name| !name.is_empty());

		let idx = if let Some(idx) = self.nearest_index(point, self.match_threshold_m) {
			let site = &mut self.sites[idx];
			if let Some(name) = name.filter(|name| *name != site.name()) {
				debug!(site_id = %site.id(), from = site.name(), to = name, "renaming matched site");
				site.set_name(name.to_string());
			}

			idx
		} else {
			let site = Site::new(
				SiteId::generate(),
				name.unwrap_or_default().to_string(),
				point,
			);
			info!(site_id = %site.id(), %point, "registering new site");
			self.sites.push(site);

			self.sites.len() - 1
		};

		&self.sites[idx]
	}

	/// Applies a deposit or withdraw of `qty` barrels, never going below zero.
	///
	/// A withdrawal larger than the stock empties the site; the excess is absorbed.
	pub fn apply_delta(&mut self, id: &SiteId, action: Action, qty: u32) -> Result<&Site> {
		if qty == 0 {
			return Err(CoreError::InvalidQuantity(qty));
		}

		let idx = self.position(id)?;
		let site = &mut self.sites[idx];

		let barrels = match action {
			Action::Deposit => site.barrels().saturating_add(u64::from(qty)),
			Action::Withdraw => site.barrels().saturating_sub(u64::from(qty)),
		};

		debug!(
			site_id = %site.id(),
			%action,
			qty,
			before = site.barrels(),
			after = barrels,
			"applying inventory delta"
		);
		site.set_barrels(barrels);

		Ok(&self.sites[idx])
	}

	/// Sets the display name; an empty (or blank) name clears it.
	pub fn rename(&mut self, id: &SiteId, name: &str) -> Result<&Site> {
		let idx = self.position(id)?;
		self.sites[idx].set_name(name.trim().to_string());

		Ok(&self.sites[idx])
	}

	/// Removes the site. Ledger entries referencing it are left untouched.
	pub fn delete(&mut self, id: &SiteId) -> Result<Site> {
		let idx = self.position(id)?;
		let site = self.sites.remove(idx);
		info!(site_id = %site.id(), "site deleted");

		Ok(site)
	}

	/// Sum of all barrel counts, saturating at `u64::MAX`.
	#[must_use]
	pub fn total_barrels(&self) -> u64 {
		self.sites
			.iter()
			.fold(0u64, |total, site| total.saturating_add(site.barrels()))
	}

	pub(crate) fn clear(&mut self) {
		self.sites.clear();
	}
}
