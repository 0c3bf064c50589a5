//! Share links and deep-link decoding.
//!
//! A link carries the site id as the `site` query parameter and the map view as a
//! `lat,lng,zoom` fragment, e.g. `https://depot.example/?site=abc#59.200000,9.600000,14`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::{
	domain::{Coordinates, Site, SiteId},
	registry::SiteRegistry,
};

/// Zoom used when focusing a single site.
pub const SITE_ZOOM: u8 = 14;

/// Zoom used when a fragment omits it or it does not parse.
pub const FRAGMENT_ZOOM: u8 = 12;

pub const MAX_ZOOM: u8 = 19;

const SITE_PARAM: &str = "site";

#[derive(Error, Debug)]
pub enum LinkError {
	#[error("invalid base url: {0}")]
	InvalidBase(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
	pub lat: f64,
	pub lng: f64,
	pub zoom: u8,
}

impl MapView {
	#[must_use]
	pub const fn new(lat: f64, lng: f64, zoom: u8) -> Self {
		Self { lat, lng, zoom }
	}

	#[must_use]
	pub const fn of_site(site: &Site) -> Self {
		Self::new(site.lat(), site.lng(), SITE_ZOOM)
	}
}

impl Default for MapView {
	fn default() -> Self {
		Self::new(59.2, 9.6, 6)
	}
}

/// Link to `site` on top of `base`, keeping any other query parameters.
pub fn share_link(base: &str, site: &Site) -> Result<Url, LinkError> {
	let mut url = Url::parse(base)?;

	let kept = url
		.query_pairs()
		.filter(|(key, _)| key != SITE_PARAM)
		.map(|(key, value)| (key.into_owned(), value.into_owned()))
		.collect::<Vec<_>>();

	url.query_pairs_mut()
		.clear()
		.extend_pairs(kept)
		.append_pair(SITE_PARAM, site.id().as_str());
	url.set_fragment(Some(&format!(
		"{:.6},{:.6},{SITE_ZOOM}",
		site.lat(),
		site.lng()
	)));

	Ok(url)
}

/// Decodes `lat,lng[,zoom]`. A missing or malformed zoom falls back to [`FRAGMENT_ZOOM`].
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<MapView> {
	let mut parts = fragment.trim_start_matches('#').split(',').map(str::trim);

	let lat = parts.next()?.parse::<f64>().ok()?;
	let lng = parts.next()?.parse::<f64>().ok()?;
	let at = Coordinates::new(lat, lng)?;

	let zoom = parts
		.next()
		.and_then(|zoom| zoom.parse::<i64>().ok())
		.map_or(FRAGMENT_ZOOM, |zoom| {
			u8::try_from(zoom.clamp(0, i64::from(MAX_ZOOM))).unwrap_or(FRAGMENT_ZOOM)
		});

	Some(MapView::new(at.lat(), at.lng(), zoom))
}

/// Where the map should open for `link`.
///
/// A known `site` wins, then a parsable fragment, then `default_view`. Nothing here fails: a
/// link that cannot be understood simply opens the default view.
#[must_use]
pub fn resolve_deep_link(link: &str, registry: &SiteRegistry, default_view: MapView) -> MapView {
	let Ok(url) = Url::parse(link) else {
		debug!(link, "unparsable deep link");
		return default_view;
	};

	let site = url
		.query_pairs()
		.find(|(key, _)| key == SITE_PARAM)
		.and_then(|(_, id)| registry.get(&SiteId::from(id.as_ref())).cloned());

	if let Some(site) = site {
		return MapView::of_site(&site);
	}

	url.fragment()
		.and_then(parse_fragment)
		.unwrap_or(default_view)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::Coordinates;

	use pretty_assertions::assert_eq;

	const BASE: &str = "https://depot.example/map?lang=no&site=old";

	fn registry_with_site() -> (SiteRegistry, SiteId) {
		let mut registry = SiteRegistry::new();
		let id = registry
			.upsert_by_location(Coordinates::new(60.5, 10.25).unwrap(), Some("Ridge"))
			.id()
			.clone();

		(registry, id)
	}

	#[test]
	fn share_link_replaces_site_and_sets_fragment() {
		let (registry, id) = registry_with_site();
		let site = registry.get(&id).unwrap();

		let url = share_link(BASE, site).unwrap();

		assert_eq!(
			url.as_str(),
			format!("https://depot.example/map?lang=no&site={id}#60.500000,10.250000,14")
		);
		assert!(share_link("not a url", site).is_err());
	}

	#[test]
	fn known_site_wins_over_fragment() {
		let (registry, id) = registry_with_site();
		let link = format!("https://depot.example/?site={id}#1.0,2.0,3");

		assert_eq!(
			resolve_deep_link(&link, &registry, MapView::default()),
			MapView::new(60.5, 10.25, 14)
		);
	}

	#[test]
	fn falls_back_to_fragment_then_default() {
		let (registry, _) = registry_with_site();
		let default_view = MapView::default();

		assert_eq!(
			resolve_deep_link("https://depot.example/?site=gone#61.1,11.2", &registry, default_view),
			MapView::new(61.1, 11.2, FRAGMENT_ZOOM)
		);
		assert_eq!(
			resolve_deep_link("https://depot.example/#61.1,11.2,zz", &registry, default_view),
			MapView::new(61.1, 11.2, FRAGMENT_ZOOM)
		);
		assert_eq!(
			resolve_deep_link("https://depot.example/#61.1,11.2,8", &registry, default_view),
			MapView::new(61.1, 11.2, 8)
		);
		assert_eq!(
			resolve_deep_link("https://depot.example/#north,11.2", &registry, default_view),
			default_view
		);
		assert_eq!(
			resolve_deep_link("::nonsense::", &registry, default_view),
			default_view
		);
	}

	#[test]
	fn fragment_zoom_is_clamped() {
		assert_eq!(parse_fragment("#1,2,40").unwrap().zoom, MAX_ZOOM);
		assert_eq!(parse_fragment("1,2,-3").unwrap().zoom, 0);
		assert!(parse_fragment("1").is_none());
		assert!(parse_fragment("95,2").is_none());
	}
}
