//! Read models derived from registry state on demand.

use serde::Serialize;

use crate::{
	domain::{Site, SiteId},
	format::{coords, thousands},
	registry::SiteRegistry,
};

pub const LITERS_PER_BARREL: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
	pub barrels: u64,
	pub liters: u64,
}

impl Totals {
	#[must_use]
	pub fn of(registry: &SiteRegistry, liters_per_barrel: u64) -> Self {
		let barrels = registry.total_barrels();

		Self {
			barrels,
			liters: barrels.saturating_mul(liters_per_barrel),
		}
	}

	/// One-line summary for sharing.
	#[must_use]
	pub fn share_text(&self) -> String {
		format!(
			"Fuel totals — Barrels: {}, Liters: {}",
			self.barrels,
			thousands(self.liters)
		)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteRow {
	pub id: SiteId,
	pub name: String,
	pub coords: String,
	pub barrels: u64,
	pub liters: u64,
	pub is_empty: bool,
}

impl SiteRow {
	fn new(site: &Site, liters_per_barrel: u64) -> Self {
		Self {
			id: site.id().clone(),
			name: site.name().to_string(),
			coords: coords(site.lat(), site.lng()),
			barrels: site.barrels(),
			liters: site.barrels().saturating_mul(liters_per_barrel),
			is_empty: site.barrels() == 0,
		}
	}
}

/// Sites sorted by barrels (most first), then by name ignoring case.
///
/// `filter` keeps only names containing it, ignoring case; a blank filter keeps everything.
#[must_use]
pub fn site_list(registry: &SiteRegistry, filter: &str, liters_per_barrel: u64) -> Vec<SiteRow> {
	let filter = filter.trim().to_lowercase();

	let mut sites = registry
		.sites()
		.iter()
		.filter(|site| filter.is_empty() || site.name().to_lowercase().contains(&filter))
		.collect::<Vec<_>>();

	sites.sort_by(|a, b| {
		b.barrels()
			.cmp(&a.barrels())
			.then_with(|| a.name().to_lowercase().cmp(&b.name().to_lowercase()))
	});

	sites
		.into_iter()
		.map(|site| SiteRow::new(site, liters_per_barrel))
		.collect()
}

/// What a map needs to draw one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
	pub site_id: SiteId,
	pub lat: f64,
	pub lng: f64,
	pub label: String,
}

#[must_use]
pub fn markers(registry: &SiteRegistry) -> Vec<Marker> {
	registry
		.sites()
		.iter()
		.map(|site| Marker {
			site_id: site.id().clone(),
			lat: site.lat(),
			lng: site.lng(),
			label: thousands(site.barrels()),
		})
		.collect()
}
