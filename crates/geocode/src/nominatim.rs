use async_trait::async_trait;
use fd_core::{config::GeocodingConfig, Coordinates};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{GeocodeError, Geocoder};

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Place {
	pub lat: String,
	pub lon: String,
	#[serde(default)]
	pub display_name: String,
}

impl Place {
	pub fn coordinates(&self) -> Result<Coordinates, GeocodeError> {
		let parse = |value: &str| {
			value
				.trim()
				.parse::<f64>()
				.map_err(|e| GeocodeError::Decode(format!("bad coordinate '{value}': {e}")))
		};

		let (lat, lng) = (parse(&self.lat)?, parse(&self.lon)?);

		Coordinates::new(lat, lng).ok_or_else(|| {
			GeocodeError::Decode(format!("coordinates out of range: {lat}, {lng}"))
		})
	}
}

/// [`Geocoder`] backed by a Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
	client: reqwest::Client,
	endpoint: String,
	country_codes: String,
	suggestion_limit: u8,
	min_query_len: usize,
}

impl NominatimClient {
	pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodeError> {
		let client = reqwest::Client::builder()
			.user_agent(config.user_agent.as_str())
			.build()?;

		Ok(Self::with_client(client, config))
	}

	pub fn with_client(client: reqwest::Client, config: &GeocodingConfig) -> Self {
		Self {
			client,
			endpoint: config.endpoint.clone(),
			country_codes: config.country_codes.clone(),
			suggestion_limit: config.suggestion_limit,
			min_query_len: config.min_query_len,
		}
	}

	fn search_request(&self, query: &str, limit: u8) -> reqwest::RequestBuilder {
		let mut params = vec![
			("format", "json".to_string()),
			("q", query.to_string()),
			("limit", limit.to_string()),
			("addressdetails", "0".to_string()),
		];
		if !self.country_codes.is_empty() {
			params.push(("countrycodes", self.country_codes.clone()));
		}

		self.client
			.get(&self.endpoint)
			.query(&params)
			.header(ACCEPT, "application/json")
	}

	async fn search(&self, query: &str, limit: u8) -> Result<Vec<Place>, GeocodeError> {
		let places = self
			.search_request(query, limit)
			.send()
			.await
			.and_then(reqwest::Response::error_for_status)?
			.json::<Vec<Place>>()
			.await?;

		debug!(query, hits = places.len(), "geocoding search finished");

		Ok(places)
	}

	#[instrument(skip(self))]
	pub async fn try_forward_geocode(&self, query: &str) -> Result<Coordinates, GeocodeError> {
		let query = query.trim();
		if query.is_empty() {
			return Err(GeocodeError::NotFound(String::new()));
		}

		self.search(query, 1)
			.await?
			.first()
			.ok_or_else(|| GeocodeError::NotFound(query.to_string()))?
			.coordinates()
	}

	#[instrument(skip(self))]
	pub async fn try_suggest(&self, query: &str) -> Result<Vec<String>, GeocodeError> {
		let query = query.trim();
		if query.chars().count() < self.min_query_len {
			return Ok(Vec::new());
		}

		Ok(self
			.search(query, self.suggestion_limit)
			.await?
			.into_iter()
			.map(|place| place.display_name)
			.filter(|name| !name.is_empty())
			.collect())
	}
}

#[async_trait]
impl Geocoder for NominatimClient {
	async fn forward_geocode(&self, query: &str) -> Option<Coordinates> {
		match self.try_forward_geocode(query).await {
			Ok(at) => Some(at),
			Err(e @ GeocodeError::NotFound(_)) => {
				debug!(%e, "address not found");
				None
			}
			Err(e) => {
				warn!(%e, "forward geocoding failed");
				None
			}
		}
	}

	async fn suggest(&self, query: &str) -> Vec<String> {
		self.try_suggest(query).await.unwrap_or_else(|e| {
			warn!(%e, "address suggestions failed");
			Vec::new()
		})
	}
}
