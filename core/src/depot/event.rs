use crate::{
	domain::{Action, Coordinates, OperationRequest, Site, SiteId},
	resolver::Resolution,
};

/// Everything the presentation layer can ask of a [`super::Depot`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	/// The operation form was submitted. Missing coordinates or name fall back to the current
	/// selection.
	Submit(OperationRequest),
	/// Deposit/withdraw buttons on a site popup or list row.
	QuickOperation {
		site_id: SiteId,
		action: Action,
		qty: Option<i64>,
		/// Falls back to the configured default operator when blank.
		operator: Option<String>,
	},
	MapClick {
		lat: f64,
		lng: f64,
	},
	MarkerClick {
		site_id: SiteId,
	},
	/// Coordinates typed in by hand, geocoded, or taken from a GPS fix.
	SelectCoordinates {
		lat: f64,
		lng: f64,
	},
	RenameSite {
		site_id: SiteId,
		name: String,
	},
	DeleteSite {
		site_id: SiteId,
	},
	ClearAll {
		confirmed: bool,
	},
}

/// Result of a dispatched [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
	Committed(Resolution),
	Selected {
		coordinates: Coordinates,
		name_prefill: Option<String>,
	},
	Renamed(Site),
	Deleted(Site),
	Cleared,
}

impl Outcome {
	/// Short message to flash at the user, if the outcome warrants one.
	#[must_use]
	pub fn notification(&self) -> Option<String> {
		match self {
			Self::Committed(Resolution { site, entry }) => Some(format!(
				"{} {} barrel(s) @ {}",
				entry.action().past_tense(),
				entry.qty(),
				site.display_name().unwrap_or("site")
			)),
			Self::Selected { .. } => None,
			Self::Renamed(_) => Some("Site renamed".to_string()),
			Self::Deleted(_) => Some("Site deleted".to_string()),
			Self::Cleared => Some("All data cleared".to_string()),
		}
	}
}
