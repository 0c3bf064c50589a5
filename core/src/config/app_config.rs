//! Application configuration

use super::{default_data_dir, GeocodingConfig, MatchingConfig, Migrate};
use crate::link::MapView;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config file name inside the data directory
pub const CONFIG_FILE_NAME: &str = "fuel-depot.json";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
	/// Config schema version
	pub version: u32,

	/// Data directory path
	pub data_dir: PathBuf,

	/// Logging filter used when `RUST_LOG` is unset
	pub log_level: String,

	#[serde(default)]
	pub matching: MatchingConfig,

	pub liters_per_barrel: u64,

	/// Operator recorded by quick operations when none is given
	pub default_operator: String,

	/// Map view opened when a deep link cannot be resolved
	pub default_view: MapView,

	/// Address lookup, added in v2
	#[serde(default)]
	pub geocoding: GeocodingConfig,
}

impl AppConfig {
	/// Load configuration from the default location
	pub fn load() -> Result<Self> {
		let data_dir = default_data_dir()?;
		Self::load_from(&data_dir)
	}

	/// Load configuration from a specific data directory, creating it with defaults when
	/// missing
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			info!("Loading config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let mut config: AppConfig = serde_json::from_str(&json)?;
			let mut dirty = false;

			if config.version > Self::target_version() {
				return Err(anyhow!(
					"Config version v{} is newer than the supported v{}",
					config.version,
					Self::target_version()
				));
			}

			if config.version < Self::target_version() {
				info!(
					"Migrating config from v{} to v{}",
					config.version,
					Self::target_version()
				);
				config.migrate()?;
				dirty = true;
			}

			// The directory the file was found in wins over the one recorded inside it
			if config.data_dir != data_dir {
				warn!(
					"Config at {:?} points at {:?}; using its own directory",
					config_path, config.data_dir
				);
				config.data_dir = data_dir.to_path_buf();
				dirty = true;
			}

			if dirty {
				config.save()?;
			}

			Ok(config)
		} else {
			warn!("No config found, creating default at {:?}", config_path);
			let config = Self::default_with_dir(data_dir.to_path_buf());
			config.save()?;
			Ok(config)
		}
	}

	/// Create default configuration with specific data directory
	pub fn default_with_dir(data_dir: PathBuf) -> Self {
		Self {
			version: Self::target_version(),
			data_dir,
			log_level: "fd_core=info,fd_cli=info,fd_geocode=info".to_string(),
			matching: MatchingConfig::default(),
			liters_per_barrel: crate::view::LITERS_PER_BARREL,
			default_operator: "crew".to_string(),
			default_view: MapView::default(),
			geocoding: GeocodingConfig::default(),
		}
	}

	/// Save configuration to disk
	pub fn save(&self) -> Result<()> {
		fs::create_dir_all(&self.data_dir)?;

		let config_path = self.config_path();
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved config to {:?}", config_path);
		Ok(())
	}

	pub fn config_path(&self) -> PathBuf {
		self.data_dir.join(CONFIG_FILE_NAME)
	}

	/// Directory holding the persisted sites and history
	pub fn store_dir(&self) -> PathBuf {
		self.data_dir.join("store")
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		let data_dir = default_data_dir().unwrap_or_else(|_| PathBuf::from("."));
		Self::default_with_dir(data_dir)
	}
}

impl Migrate for AppConfig {
	fn current_version(&self) -> u32 {
		self.version
	}

	fn target_version() -> u32 {
		2
	}

	fn migrate(&mut self) -> Result<()> {
		match self.version {
			1 => {
				// v1 -> v2: address lookup settings
				self.geocoding = GeocodingConfig::default();
				self.version = 2;
				self.migrate()
			}
			2 => Ok(()),
			v => Err(anyhow!("Unknown config version: {}", v)),
		}
	}
}
