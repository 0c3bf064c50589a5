//! Owned application state and the event dispatcher.

mod event;

pub use event::{Event, Outcome};

use tracing::{debug, info, instrument};
use url::Url;

use crate::{
	config::AppConfig,
	domain::{Coordinates, LedgerEntry, OperationRequest, Site, SiteId},
	error::{CoreError, Result},
	export::{self, Report, ReportFormat},
	geo::{MATCH_THRESHOLD_M, PREFILL_THRESHOLD_M},
	ledger::{Ledger, Order},
	link::{self, MapView},
	persistence::{KvStore, PersistenceGateway},
	registry::SiteRegistry,
	resolver::{Clock, OperationResolver, Resolution},
	view::{self, Marker, SiteRow, Totals, LITERS_PER_BARREL},
};

#[derive(Debug, Clone, PartialEq)]
pub struct DepotConfig {
	pub match_threshold_m: f64,
	pub prefill_threshold_m: f64,
	pub liters_per_barrel: u64,
	pub default_operator: String,
	pub default_view: MapView,
}

impl Default for DepotConfig {
	fn default() -> Self {
		Self {
			match_threshold_m: MATCH_THRESHOLD_M,
			prefill_threshold_m: PREFILL_THRESHOLD_M,
			liters_per_barrel: LITERS_PER_BARREL,
			default_operator: "crew".to_string(),
			default_view: MapView::default(),
		}
	}
}

impl From<&AppConfig> for DepotConfig {
	fn from(config: &AppConfig) -> Self {
		Self {
			match_threshold_m: config.matching.match_threshold_m,
			prefill_threshold_m: config.matching.prefill_threshold_m,
			liters_per_barrel: config.liters_per_barrel,
			default_operator: config.default_operator.clone(),
			default_view: config.default_view,
		}
	}
}

/// The point currently picked on the map, waiting for an operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
	pub coordinates: Option<Coordinates>,
	/// Name of a nearby site, offered as the form's default
	pub name_prefill: Option<String>,
	/// A preview marker is shown until the next committed operation
	pub preview: bool,
}

/// Registry, ledger and persistence for one session.
///
/// All mutations go through `&mut self`, so the presentation layer can only read state
/// between calls.
#[derive(Debug)]
pub struct Depot<S> {
	registry: SiteRegistry,
	ledger: Ledger,
	resolver: OperationResolver,
	gateway: PersistenceGateway<S>,
	config: DepotConfig,
	selection: Selection,
}

impl<S: KvStore> Depot<S> {
	/// Loads persisted state from `store`. Missing or corrupt data starts empty.
	pub fn open(store: S, config: DepotConfig) -> Self {
		let gateway = PersistenceGateway::new(store);
		let snapshot = gateway.load();

		info!(
			sites = snapshot.sites.len(),
			entries = snapshot.history.len(),
			"depot opened"
		);

		Self {
			registry: SiteRegistry::from_sites(snapshot.sites, config.match_threshold_m),
			ledger: Ledger::from_entries(snapshot.history),
			resolver: OperationResolver::default(),
			gateway,
			config,
			selection: Selection::default(),
		}
	}

	#[must_use]
	pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
		self.resolver = OperationResolver::new(clock);
		self
	}

	pub const fn registry(&self) -> &SiteRegistry {
		&self.registry
	}

	pub const fn ledger(&self) -> &Ledger {
		&self.ledger
	}

	pub const fn config(&self) -> &DepotConfig {
		&self.config
	}

	pub const fn selection(&self) -> &Selection {
		&self.selection
	}

	pub const fn store(&self) -> &S {
		self.gateway.store()
	}

	pub fn resolve(&mut self, request: OperationRequest) -> Result<Resolution> {
		let resolution = self.resolver.resolve(
			&mut self.registry,
			&mut self.ledger,
			&mut self.gateway,
			request,
		)?;
		self.selection.preview = false;

		Ok(resolution)
	}

	pub fn rename_site(&mut self, id: &SiteId, name: &str) -> Result<&Site> {
		self.registry.rename(id, name)?;
		self.persist();

		self.registry
			.get(id)
			.ok_or_else(|| CoreError::SiteNotFound(id.clone()))
	}

	/// Removes the site; its history stays.
	pub fn delete_site(&mut self, id: &SiteId) -> Result<Site> {
		let site = self.registry.delete(id)?;
		self.persist();

		Ok(site)
	}

	/// Wipes every site, the whole history and the persisted copy.
	pub fn clear_all(&mut self, confirmed: bool) -> Result<()> {
		if !confirmed {
			return Err(CoreError::ConfirmationRequired);
		}

		self.registry.clear();
		self.ledger.clear();
		self.gateway.clear();
		self.selection = Selection::default();
		info!("all data cleared");

		Ok(())
	}

	/// Picks `coordinates`, pre-filling the name of a site within the prefill threshold.
	pub fn select(&mut self, coordinates: Coordinates) -> &Selection {
		let name_prefill = self
			.registry
			.nearest(coordinates, self.config.prefill_threshold_m)
			.map(|site| site.name().to_string());

		self.set_selection(coordinates, name_prefill)
	}

	fn set_selection(&mut self, coordinates: Coordinates, name_prefill: Option<String>) -> &Selection {
		debug!(%coordinates, ?name_prefill, "selection changed");
		self.selection = Selection {
			coordinates: Some(coordinates),
			name_prefill,
			preview: true,
		};

		&self.selection
	}

	fn persist(&mut self) {
		self.gateway
			.save(self.registry.sites(), self.ledger.entries());
	}

	fn site(&self, id: &SiteId) -> Result<&Site> {
		self.registry
			.get(id)
			.ok_or_else(|| CoreError::SiteNotFound(id.clone()))
	}

	#[must_use]
	pub fn totals(&self) -> Totals {
		Totals::of(&self.registry, self.config.liters_per_barrel)
	}

	#[must_use]
	pub fn site_list(&self, filter: &str) -> Vec<SiteRow> {
		view::site_list(&self.registry, filter, self.config.liters_per_barrel)
	}

	#[must_use]
	pub fn markers(&self) -> Vec<Marker> {
		view::markers(&self.registry)
	}

	#[must_use]
	pub fn history(&self, order: Order) -> Vec<&LedgerEntry> {
		self.ledger.entries_by_time(order)
	}

	pub fn share_link(&self, base: &str, id: &SiteId) -> Result<Url> {
		Ok(link::share_link(base, self.site(id)?)?)
	}

	#[must_use]
	pub fn resolve_deep_link(&self, link: &str) -> MapView {
		link::resolve_deep_link(link, &self.registry, self.config.default_view)
	}

	pub fn export(&self, format: ReportFormat) -> Result<Report> {
		export::render(
			format,
			&self.registry,
			&self.ledger,
			self.config.liters_per_barrel,
		)
	}

	/// Single entry point for presentation events.
	#[instrument(skip(self), err)]
	pub fn dispatch(&mut self, event: Event) -> Result<Outcome> {
		match event {
			Event::Submit(mut request) => {
				if !request.has_coordinates() {
					if let Some(at) = self.selection.coordinates {
						request = request.at_coordinates(at);
					}
				}
				if request.name.is_none() {
					request.name = self.selection.name_prefill.clone();
				}

				self.resolve(request).map(Outcome::Committed)
			}

			Event::QuickOperation {
				site_id,
				action,
				qty,
				operator,
			} => {
				let site = self.site(&site_id)?;
				let operator = operator
					.map(|operator| operator.trim().to_string())
					.filter(|operator| !operator.is_empty())
					.unwrap_or_else(|| self.config.default_operator.clone());

				let mut request = OperationRequest::new(action, operator)
					.name(site.name())
					.at(site.lat(), site.lng());
				request.qty = qty;

				self.resolve(request).map(Outcome::Committed)
			}

			Event::MapClick { lat, lng } => {
				let at = Coordinates::new(lat, lng).ok_or(CoreError::MissingCoordinates)?;
				let selection = self.select(at);

				Ok(Outcome::Selected {
					coordinates: at,
					name_prefill: selection.name_prefill.clone(),
				})
			}

			Event::MarkerClick { site_id } => {
				let site = self.site(&site_id)?;
				let at = Coordinates::new(site.lat(), site.lng())
					.ok_or(CoreError::MissingCoordinates)?;
				let name = site.name().to_string();
				self.set_selection(at, Some(name.clone()));

				Ok(Outcome::Selected {
					coordinates: at,
					name_prefill: Some(name),
				})
			}

			Event::SelectCoordinates { lat, lng } => {
				let at = Coordinates::new(lat, lng).ok_or(CoreError::MissingCoordinates)?;
				self.set_selection(at, None);

				Ok(Outcome::Selected {
					coordinates: at,
					name_prefill: None,
				})
			}

			Event::RenameSite { site_id, name } => self
				.rename_site(&site_id, &name)
				.map(|site| Outcome::Renamed(site.clone())),

			Event::DeleteSite { site_id } => self.delete_site(&site_id).map(Outcome::Deleted),

			Event::ClearAll { confirmed } => self.clear_all(confirmed).map(|()| Outcome::Cleared),
		}
	}
}
