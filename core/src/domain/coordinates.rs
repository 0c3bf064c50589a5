use std::{fmt, ops::Neg, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{LAT_MAX_POS, LONG_MAX_POS};

/// A validated WGS84 coordinate pair.
///
/// Both values are finite, latitude lies in `[-90, 90]` and longitude in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
	lat: f64,
	lng: f64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatesParseError {
	#[error("expected \"lat,lng\" (got {0:?})")]
	Format(String),
	#[error("coordinates out of range (lat: {lat}, lng: {lng})")]
	OutOfRange { lat: String, lng: String },
}

impl Coordinates {
	/// Returns `None` when either value is not finite or falls outside the valid range.
	///
	/// # Examples
	///
	/// ```
	/// use fd_core::domain::Coordinates;
	///
	/// assert!(Coordinates::new(59.2, 9.6).is_some());
	/// assert!(Coordinates::new(91.0, 9.6).is_none());
	/// assert!(Coordinates::new(f64::NAN, 9.6).is_none());
	/// ```
	#[must_use]
	pub fn new(lat: f64, lng: f64) -> Option<Self> {
		let in_range = |v: f64, max: f64| v.is_finite() && (max.neg()..=max).contains(&v);

		(in_range(lat, LAT_MAX_POS) && in_range(lng, LONG_MAX_POS)).then_some(Self { lat, lng })
	}

	/// Same as [`Coordinates::new`], for values that may be absent altogether.
	#[must_use]
	pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
		Self::new(lat?, lng?)
	}

	#[inline]
	#[must_use]
	pub const fn lat(&self) -> f64 {
		self.lat
	}

	#[inline]
	#[must_use]
	pub const fn lng(&self) -> f64 {
		self.lng
	}
}

impl fmt::Display for Coordinates {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:.6}, {:.6}", self.lat, self.lng)
	}
}

impl FromStr for Coordinates {
	type Err = CoordinatesParseError;

	/// Parses `"lat,lng"` or `"lat lng"`. Any run of whitespace and commas separates the two
	/// values.
	///
	/// # Examples:
	///
	/// ```
	/// use fd_core::domain::Coordinates;
	///
	/// let point: Coordinates = " 59.91, 10.75 ".parse().unwrap();
	/// assert_eq!((point.lat(), point.lng()), (59.91, 10.75));
	///
	/// let point: Coordinates = "59.91   10.75".parse().unwrap();
	/// assert_eq!(point.to_string(), "59.910000, 10.750000");
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut parts = s
			.trim()
			.split(|c: char| c.is_whitespace() || c == ',')
			.filter(|part| !part.is_empty());

		let (Some(lat), Some(lng)) = (parts.next(), parts.next()) else {
			return Err(CoordinatesParseError::Format(s.to_string()));
		};

		let (Ok(lat_value), Ok(lng_value)) = (lat.parse::<f64>(), lng.parse::<f64>()) else {
			return Err(CoordinatesParseError::Format(s.to_string()));
		};

		Self::new(lat_value, lng_value).ok_or_else(|| CoordinatesParseError::OutOfRange {
			lat: lat.to_string(),
			lng: lng.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_out_of_range_and_non_finite() {
		assert!(Coordinates::new(-90.0, 180.0).is_some());
		assert!(Coordinates::new(-90.1, 0.0).is_none());
		assert!(Coordinates::new(0.0, 180.5).is_none());
		assert!(Coordinates::new(0.0, f64::INFINITY).is_none());
		assert!(Coordinates::from_parts(Some(10.0), None).is_none());
	}

	#[test]
	fn parses_manual_input() {
		let parsed = "59.2,9.6".parse::<Coordinates>().unwrap();
		assert_eq!(parsed, Coordinates::new(59.2, 9.6).unwrap());

		let parsed = "59.2 , 9.6".parse::<Coordinates>().unwrap();
		assert_eq!(parsed, Coordinates::new(59.2, 9.6).unwrap());

		assert!(matches!(
			"59.2".parse::<Coordinates>(),
			Err(CoordinatesParseError::Format(_))
		));
		assert!(matches!(
			"north,east".parse::<Coordinates>(),
			Err(CoordinatesParseError::Format(_))
		));
		assert!(matches!(
			"120,9".parse::<Coordinates>(),
			Err(CoordinatesParseError::OutOfRange { .. })
		));
	}
}
