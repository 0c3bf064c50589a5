//! Address lookup for the fuel depot.
//!
//! [`Geocoder`] is the seam the rest of the workspace talks to. Its methods never fail:
//! network and decode errors are logged and read as "nothing found". [`NominatimClient`] is
//! the HTTP implementation, [`SuggestionService`] debounces type-ahead lookups on top of any
//! geocoder.

#![warn(
	clippy::all,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::dbg_macro,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use async_trait::async_trait;
use fd_core::Coordinates;

mod nominatim;
mod suggest;

pub use nominatim::{NominatimClient, Place};
pub use suggest::{SuggestionService, Suggestions};

#[derive(thiserror::Error, Debug)]
pub enum GeocodeError {
	#[error("no match for '{0}'")]
	NotFound(String),
	#[error("geocoding request failed: {0}")]
	Http(#[from] reqwest::Error),
	#[error("unexpected geocoding response: {0}")]
	Decode(String),
}

#[async_trait]
pub trait Geocoder: Send + Sync {
	/// Best match for `query`, if any.
	async fn forward_geocode(&self, query: &str) -> Option<Coordinates>;

	/// Display names of candidate places for a partially typed `query`.
	async fn suggest(&self, query: &str) -> Vec<String>;
}
