//! Text formatting shared by read models, reports and the CLI.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::domain::Timestamp;

/// Groups digits in threes with a comma: `12345` becomes `"12,345"`.
///
/// # Examples
///
/// ```
/// use fd_core::format::thousands;
///
/// assert_eq!(thousands(0), "0");
/// assert_eq!(thousands(1_000), "1,000");
/// assert_eq!(thousands(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn thousands(value: u64) -> String {
	let digits = value.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);

	for (i, digit) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(digit);
	}

	out
}

/// `lat, lng` with six decimals each.
#[must_use]
pub fn coords(lat: f64, lng: f64) -> String {
	format!("{lat:.6}, {lng:.6}")
}

/// Escapes the five HTML-significant characters.
#[must_use]
pub fn escape_html(text: &str) -> String {
	let mut out = String::with_capacity(text.len());

	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			c => out.push(c),
		}
	}

	out
}

/// Renders an epoch-millisecond timestamp in `tz`. Out of range values print as the raw number.
#[must_use]
pub fn timestamp_in<Tz>(ts: Timestamp, tz: &Tz) -> String
where
	Tz: TimeZone,
	Tz::Offset: std::fmt::Display,
{
	DateTime::<Utc>::from_timestamp_millis(ts).map_or_else(
		|| ts.to_string(),
		|utc| {
			utc.with_timezone(tz)
				.format("%Y-%m-%d %H:%M:%S")
				.to_string()
		},
	)
}

/// [`timestamp_in`] the local time zone.
#[must_use]
pub fn local_time(ts: Timestamp) -> String {
	timestamp_in(ts, &Local)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn thousands_separators() {
		assert_eq!(thousands(999), "999");
		assert_eq!(thousands(12_345), "12,345");
		assert_eq!(thousands(100_000), "100,000");
		assert_eq!(thousands(u64::MAX), "18,446,744,073,709,551,615");
	}

	#[test]
	fn escapes_markup() {
		assert_eq!(
			escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
			"&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
		);
		assert_eq!(escape_html("plain"), "plain");
	}

	#[test]
	fn six_decimal_coordinates() {
		assert_eq!(coords(59.2, 9.6), "59.200000, 9.600000");
		assert_eq!(coords(-0.1234567, 179.9999999), "-0.123457, 180.000000");
	}

	#[test]
	fn utc_timestamps() {
		assert_eq!(timestamp_in(0, &Utc), "1970-01-01 00:00:00");
		assert_eq!(timestamp_in(1_700_000_000_000, &Utc), "2023-11-14 22:13:20");
		assert_eq!(timestamp_in(i64::MAX, &Utc), i64::MAX.to_string());
	}
}
