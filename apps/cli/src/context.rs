use anyhow::Result;
use fd_core::{config::AppConfig, persistence::FileKvStore, Depot, DepotConfig};
use fd_geocode::NominatimClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

pub struct Context {
	pub depot: Depot<FileKvStore>,
	pub config: AppConfig,
	pub format: OutputFormat,
}

impl Context {
	/// Opens the depot stored under the config's data directory.
	pub fn new(config: AppConfig, format: OutputFormat) -> Self {
		let depot = Depot::open(
			FileKvStore::new(config.store_dir()),
			DepotConfig::from(&config),
		);

		Self {
			depot,
			config,
			format,
		}
	}

	pub fn geocoder(&self) -> Result<NominatimClient> {
		Ok(NominatimClient::new(&self.config.geocoding)?)
	}
}
