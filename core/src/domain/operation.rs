use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Coordinates, Site, SiteId};

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Action {
	Deposit,
	Withdraw,
}

impl Action {
	/// Signed inventory delta for `qty` barrels.
	#[must_use]
	pub fn signed(self, qty: u32) -> i64 {
		match self {
			Self::Deposit => i64::from(qty),
			Self::Withdraw => -i64::from(qty),
		}
	}

	#[must_use]
	pub const fn past_tense(self) -> &'static str {
		match self {
			Self::Deposit => "Deposited",
			Self::Withdraw => "Withdrew",
		}
	}
}

/// Lenient integer parsing for quantity fields: leading whitespace, an optional sign and the
/// leading run of digits. Trailing garbage is ignored, so `"12 barrels"` reads as 12.
///
/// # Examples
///
/// ```
/// use fd_core::domain::parse_quantity;
///
/// assert_eq!(parse_quantity("12 barrels"), Some(12));
/// assert_eq!(parse_quantity("-3"), Some(-3));
/// assert_eq!(parse_quantity("many"), None);
/// ```
#[must_use]
pub fn parse_quantity(text: &str) -> Option<i64> {
	let text = text.trim_start();
	let (negative, rest) = match text.as_bytes().first() {
		Some(b'-') => (true, &text[1..]),
		Some(b'+') => (false, &text[1..]),
		_ => (false, text),
	};

	let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
	if digits_len == 0 {
		return None;
	}

	// Only overflow can fail here, every byte is an ASCII digit
	let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);

	Some(if negative { -magnitude } else { magnitude })
}

/// Anything that is not a positive integer becomes a single barrel.
#[must_use]
pub fn coerce_quantity(raw: Option<i64>) -> u32 {
	match raw {
		Some(qty) if qty > 0 => u32::try_from(qty).unwrap_or(u32::MAX),
		_ => 1,
	}
}

/// Raw operation input as gathered by the presentation layer.
///
/// Nothing here is validated yet; [`crate::OperationResolver::resolve`] does that before
/// touching any state.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
	pub action: Action,
	pub operator: String,
	pub qty: Option<i64>,
	pub name: Option<String>,
	pub lat: Option<f64>,
	pub lng: Option<f64>,
}

impl OperationRequest {
	pub fn new(action: Action, operator: impl Into<String>) -> Self {
		Self {
			action,
			operator: operator.into(),
			qty: None,
			name: None,
			lat: None,
			lng: None,
		}
	}

	#[must_use]
	pub fn qty(mut self, qty: i64) -> Self {
		self.qty = Some(qty);
		self
	}

	#[must_use]
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	#[must_use]
	pub fn at(mut self, lat: f64, lng: f64) -> Self {
		self.lat = Some(lat);
		self.lng = Some(lng);
		self
	}

	#[must_use]
	pub fn at_coordinates(self, at: Coordinates) -> Self {
		self.at(at.lat(), at.lng())
	}

	#[must_use]
	pub fn has_coordinates(&self) -> bool {
		self.lat.is_some() && self.lng.is_some()
	}
}

/// Immutable record of one deposit or withdraw event.
///
/// Site name and location are snapshots taken right after the inventory change committed;
/// renaming or deleting the site later does not touch existing entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
	ts: Timestamp,
	action: Action,
	operator: String,
	qty: u32,
	site_id: SiteId,
	#[serde(default)]
	site_name: String,
	lat: f64,
	lng: f64,
}

impl LedgerEntry {
	pub(crate) fn snapshot(
		ts: Timestamp,
		action: Action,
		operator: String,
		qty: u32,
		site: &Site,
	) -> Self {
		Self {
			ts,
			action,
			operator,
			qty,
			site_id: site.id().clone(),
			site_name: site.name().to_string(),
			lat: site.lat(),
			lng: site.lng(),
		}
	}

	#[must_use]
	pub const fn ts(&self) -> Timestamp {
		self.ts
	}

	#[must_use]
	pub const fn action(&self) -> Action {
		self.action
	}

	#[must_use]
	pub fn operator(&self) -> &str {
		&self.operator
	}

	#[must_use]
	pub const fn qty(&self) -> u32 {
		self.qty
	}

	#[must_use]
	pub const fn site_id(&self) -> &SiteId {
		&self.site_id
	}

	#[must_use]
	pub fn site_name(&self) -> &str {
		&self.site_name
	}

	#[must_use]
	pub const fn lat(&self) -> f64 {
		self.lat
	}

	#[must_use]
	pub const fn lng(&self) -> f64 {
		self.lng
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn action_round_trips_through_text() {
		assert_eq!("withdraw".parse::<Action>().unwrap(), Action::Withdraw);
		assert_eq!("Deposit".parse::<Action>().unwrap(), Action::Deposit);
		assert_eq!(Action::Withdraw.to_string(), "withdraw");
		assert_eq!(
			serde_json::to_string(&Action::Deposit).unwrap(),
			r#""deposit""#
		);
	}

	#[test]
	fn quantity_falls_back_to_one() {
		assert_eq!(coerce_quantity(Some(7)), 7);
		assert_eq!(coerce_quantity(Some(0)), 1);
		assert_eq!(coerce_quantity(Some(-4)), 1);
		assert_eq!(coerce_quantity(None), 1);
		assert_eq!(coerce_quantity(parse_quantity("abc")), 1);
		assert_eq!(coerce_quantity(Some(i64::MAX)), u32::MAX);
	}

	#[test]
	fn signed_delta() {
		assert_eq!(Action::Deposit.signed(4), 4);
		assert_eq!(Action::Withdraw.signed(4), -4);
	}

	#[test]
	fn entry_uses_camel_case_wire_names() {
		let json = r#"{"ts":1700000000000,"action":"withdraw","operator":"crew","qty":2,
			"siteId":"abc","siteName":"North pad","lat":59.2,"lng":9.6}"#;
		let entry: LedgerEntry = serde_json::from_str(json).unwrap();

		assert_eq!(entry.site_id().as_str(), "abc");
		assert_eq!(entry.site_name(), "North pad");
		assert_eq!(entry.action(), Action::Withdraw);
	}
}
