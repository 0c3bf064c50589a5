use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Coordinates;

/// Opaque, immutable site identifier.
///
/// Freshly generated ids are simple-format UUIDs, but any string loaded from the store is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
	#[must_use]
	pub fn generate() -> Self {
		let mut buf = Uuid::encode_buffer();

		Self(Uuid::new_v4().as_simple().encode_lower(&mut buf).to_owned())
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SiteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SiteId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<String> for SiteId {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// A depot location with its barrel inventory.
///
/// Fields are only mutated by [`crate::SiteRegistry`]; everything else gets read access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
	id: SiteId,
	#[serde(default)]
	name: String,
	lat: f64,
	lng: f64,
	#[serde(default)]
	barrels: u64,
}

impl Site {
	pub(crate) fn new(id: SiteId, name: String, at: Coordinates) -> Self {
		Self {
			id,
			name,
			lat: at.lat(),
			lng: at.lng(),
			barrels: 0,
		}
	}

	#[must_use]
	pub const fn id(&self) -> &SiteId {
		&self.id
	}

	/// Display name, empty when the site was never named.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[must_use]
	pub fn display_name(&self) -> Option<&str> {
		(!self.name.is_empty()).then_some(self.name.as_str())
	}

	#[must_use]
	pub const fn lat(&self) -> f64 {
		self.lat
	}

	#[must_use]
	pub const fn lng(&self) -> f64 {
		self.lng
	}

	/// Stored sites are not re-validated on load, so this is a raw pair.
	#[must_use]
	pub const fn position(&self) -> (f64, f64) {
		(self.lat, self.lng)
	}

	#[must_use]
	pub const fn barrels(&self) -> u64 {
		self.barrels
	}

	pub(crate) fn set_name(&mut self, name: String) {
		self.name = name;
	}

	pub(crate) fn set_barrels(&mut self, barrels: u64) {
		self.barrels = barrels;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_ids_are_unique() {
		let a = SiteId::generate();
		let b = SiteId::generate();

		assert_ne!(a, b);
		assert_eq!(a.as_str().len(), 32);
	}

	#[test]
	fn decodes_stored_site_without_optional_fields() {
		let site: Site = serde_json::from_str(r#"{"id":"k3j9x0qa","lat":59.2,"lng":9.6}"#)
			.expect("valid site json");

		assert_eq!(site.id().as_str(), "k3j9x0qa");
		assert_eq!(site.display_name(), None);
		assert_eq!(site.barrels(), 0);
	}
}
