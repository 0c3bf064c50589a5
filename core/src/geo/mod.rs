//! Great-circle distance and nearest-site lookup.

use tracing::trace;

use crate::domain::{Coordinates, Site};

/// Latitudes are valid in `-LAT_MAX_POS..=LAT_MAX_POS`.
pub const LAT_MAX_POS: f64 = 90.0;

/// Longitudes are valid in `-LONG_MAX_POS..=LONG_MAX_POS`.
pub const LONG_MAX_POS: f64 = 180.0;

/// Mean Earth radius in meters, for a spherical model.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Two points closer than this are the same site when resolving an operation or a marker
/// click.
pub const MATCH_THRESHOLD_M: f64 = 25.0;

/// A map click this close to a site pre-fills that site's name.
pub const PREFILL_THRESHOLD_M: f64 = 30.0;

/// Haversine distance between two points, in meters.
///
/// # Examples
///
/// ```
/// use fd_core::geo::distance_m;
///
/// assert_eq!(distance_m((59.2, 9.6), (59.2, 9.6)), 0.0);
/// // One degree of latitude is roughly 111 km
/// let d = distance_m((0.0, 0.0), (1.0, 0.0));
/// assert!((d - 111_195.0).abs() < 1.0);
/// ```
#[must_use]
pub fn distance_m((a_lat, a_lng): (f64, f64), (b_lat, b_lng): (f64, f64)) -> f64 {
	let d_lat = (b_lat - a_lat).to_radians();
	let d_lng = (b_lng - a_lng).to_radians();

	let h = (d_lat / 2.0).sin().powi(2)
		+ a_lat.to_radians().cos() * b_lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

	2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Nearest site strictly closer than `threshold_m` to `point`.
///
/// On equal distances the first candidate in iteration order wins, so the result is
/// deterministic for a fixed site ordering.
pub fn nearest<'a>(
	sites: impl IntoIterator<Item = &'a Site>,
	point: Coordinates,
	threshold_m: f64,
) -> Option<&'a Site> {
	let origin = (point.lat(), point.lng());

	let best = sites
		.into_iter()
		.map(|site| (site, distance_m(origin, site.position())))
		.filter(|(_, distance)| *distance < threshold_m)
		.fold(None::<(&Site, f64)>, |best, (site, distance)| match best {
			Some((_, best_distance)) if best_distance <= distance => best,
			_ => Some((site, distance)),
		});

	if let Some((site, distance)) = best {
		trace!(site_id = %site.id(), distance, threshold_m, "nearest site found");
	}

	best.map(|(site, _)| site)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::SiteId;

	fn site(id: &str, lat: f64, lng: f64) -> Site {
		Site::new(
			SiteId::from(id),
			String::new(),
			Coordinates::new(lat, lng).unwrap(),
		)
	}

	fn at(lat: f64, lng: f64) -> Coordinates {
		Coordinates::new(lat, lng).unwrap()
	}

	#[test]
	fn distance_is_symmetric() {
		let a = (59.2, 9.6);
		let b = (59.3, 9.7);

		assert!((distance_m(a, b) - distance_m(b, a)).abs() < 1e-9);
	}

	#[test]
	fn empty_registry_has_no_match() {
		let sites: [Site; 0] = [];

		assert!(nearest(&sites, at(59.2, 9.6), MATCH_THRESHOLD_M).is_none());
	}

	#[test]
	fn only_sites_inside_the_threshold_match() {
		let sites = [site("near", 59.2, 9.6), site("far", 59.3, 9.6)];

		// About 1.3 m away from "near"
		let hit = nearest(&sites, at(59.20001, 9.60001), MATCH_THRESHOLD_M).unwrap();
		assert_eq!(hit.id().as_str(), "near");

		// About 111 m north of "near"
		assert!(nearest(&sites, at(59.201, 9.6), MATCH_THRESHOLD_M).is_none());
	}

	#[test]
	fn threshold_is_exclusive() {
		let sites = [site("a", 0.0, 0.0)];
		let point = at(0.0001, 0.0);
		let d = distance_m((0.0, 0.0), (0.0001, 0.0));

		assert!(nearest(&sites, point, d).is_none());
		assert!(nearest(&sites, point, d + 0.001).is_some());
	}

	#[test]
	fn picks_the_closest_and_breaks_ties_by_order() {
		let sites = [
			site("east", 59.2, 9.60010),
			site("west", 59.2, 9.59990),
			site("closer", 59.2, 9.60005),
		];

		let hit = nearest(&sites, at(59.2, 9.6), MATCH_THRESHOLD_M).unwrap();
		assert_eq!(hit.id().as_str(), "closer");

		let tied = [site("first", 59.2, 9.6001), site("second", 59.2, 9.6001)];
		let hit = nearest(&tied, at(59.2, 9.6), MATCH_THRESHOLD_M).unwrap();
		assert_eq!(hit.id().as_str(), "first");
	}
}
