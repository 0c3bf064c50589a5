use std::{
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
	time::Duration,
};

use tokio::{sync::watch, task::JoinHandle, time::sleep};
use tracing::trace;

use crate::Geocoder;

/// Suggestions for the query they were fetched for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
	pub query: String,
	pub items: Vec<String>,
}

/// Debounced type-ahead lookups.
///
/// Every [`SuggestionService::request`] supersedes the previous one: the in-flight task is
/// aborted and only the newest query ever publishes on the watch channel.
pub struct SuggestionService {
	geocoder: Arc<dyn Geocoder>,
	debounce: Duration,
	min_query_len: usize,
	tx: Arc<watch::Sender<Suggestions>>,
	generation: Arc<AtomicU64>,
	in_flight: Option<JoinHandle<()>>,
}

impl SuggestionService {
	pub fn new(geocoder: Arc<dyn Geocoder>, debounce: Duration, min_query_len: usize) -> Self {
		let (tx, _rx) = watch::channel(Suggestions::default());

		Self {
			geocoder,
			debounce,
			min_query_len,
			tx: Arc::new(tx),
			generation: Arc::new(AtomicU64::new(0)),
			in_flight: None,
		}
	}

	pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
		self.tx.subscribe()
	}

	/// Schedules a lookup for `query`. Must be called from within a tokio runtime.
	///
	/// Queries shorter than the minimum length clear the suggestions right away without
	/// touching the geocoder.
	pub fn request(&mut self, query: &str) {
		if let Some(handle) = self.in_flight.take() {
			handle.abort();
		}
		let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
		let query = query.trim().to_string();

		if query.chars().count() < self.min_query_len {
			self.tx.send_replace(Suggestions {
				query,
				items: Vec::new(),
			});
			return;
		}

		let geocoder = Arc::clone(&self.geocoder);
		let tx = Arc::clone(&self.tx);
		let latest = Arc::clone(&self.generation);
		let debounce = self.debounce;

		self.in_flight = Some(tokio::spawn(async move {
			sleep(debounce).await;
			let items = geocoder.suggest(&query).await;

			if latest.load(Ordering::SeqCst) == generation {
				trace!(%query, count = items.len(), "publishing suggestions");
				tx.send_replace(Suggestions { query, items });
			}
		}));
	}
}

impl Drop for SuggestionService {
	fn drop(&mut self) {
		if let Some(handle) = self.in_flight.take() {
			handle.abort();
		}
	}
}
