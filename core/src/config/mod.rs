//! Application configuration management

use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::geo::{MATCH_THRESHOLD_M, PREFILL_THRESHOLD_M};

pub mod app_config;

pub use app_config::AppConfig;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FUEL_DEPOT_DATA_DIR";

/// Versioned configuration that can upgrade itself in place.
pub trait Migrate {
	fn current_version(&self) -> u32;

	fn target_version() -> u32;

	/// Upgrades step by step until [`Migrate::target_version`] is reached.
	fn migrate(&mut self) -> Result<()>;
}

/// Platform-specific data directory resolution
pub fn default_data_dir() -> Result<PathBuf> {
	#[cfg(target_os = "linux")]
	let dir = dirs::data_local_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("fuel-depot");

	#[cfg(target_os = "windows")]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("FuelDepot");

	#[cfg(not(any(target_os = "linux", target_os = "windows")))]
	let dir = dirs::data_dir()
		.ok_or_else(|| anyhow!("Could not determine data directory"))?
		.join("fuel-depot");

	Ok(dir)
}

/// An explicit directory wins, then [`DATA_DIR_ENV`], then [`default_data_dir`].
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
	if let Some(dir) = explicit {
		return Ok(dir);
	}

	match env::var_os(DATA_DIR_ENV) {
		Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
		_ => default_data_dir(),
	}
}

/// Distance thresholds, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
	/// Operations and marker clicks closer than this hit an existing site
	pub match_threshold_m: f64,

	/// Map clicks closer than this pre-fill the site name
	pub prefill_threshold_m: f64,
}

impl Default for MatchingConfig {
	fn default() -> Self {
		Self {
			match_threshold_m: MATCH_THRESHOLD_M,
			prefill_threshold_m: PREFILL_THRESHOLD_M,
		}
	}
}

/// Address lookup service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodingConfig {
	pub endpoint: String,

	/// Comma separated ISO 3166-1 alpha-2 codes, empty for worldwide
	pub country_codes: String,

	pub suggestion_limit: u8,

	/// Shorter queries never produce suggestions
	pub min_query_len: usize,

	pub debounce_ms: u64,

	pub user_agent: String,
}

impl Default for GeocodingConfig {
	fn default() -> Self {
		Self {
			endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
			country_codes: "no".to_string(),
			suggestion_limit: 8,
			min_query_len: 3,
			debounce_ms: 300,
			user_agent: concat!("fuel-depot/", env!("CARGO_PKG_VERSION")).to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn explicit_data_dir_wins() {
		let dir = resolve_data_dir(Some(PathBuf::from("/tmp/depot"))).unwrap();

		assert_eq!(dir, PathBuf::from("/tmp/depot"));
	}
}
