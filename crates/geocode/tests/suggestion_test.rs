//! Debounce and supersede behaviour of the suggestion service, on paused time

use std::{
	sync::{Arc, Mutex},
	time::Duration,
};

use async_trait::async_trait;
use fd_core::Coordinates;
use fd_geocode::{Geocoder, SuggestionService, Suggestions};
use pretty_assertions::assert_eq;
use tokio::time::sleep;

const DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Default)]
struct RecordingGeocoder {
	calls: Mutex<Vec<String>>,
}

impl RecordingGeocoder {
	fn calls(&self) -> Vec<String> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl Geocoder for RecordingGeocoder {
	async fn forward_geocode(&self, _query: &str) -> Option<Coordinates> {
		None
	}

	async fn suggest(&self, query: &str) -> Vec<String> {
		self.calls.lock().unwrap().push(query.to_string());
		sleep(Duration::from_millis(50)).await;

		vec![format!("{query}, Norge")]
	}
}

fn service(geocoder: &Arc<RecordingGeocoder>) -> SuggestionService {
	SuggestionService::new(Arc::clone(geocoder) as Arc<dyn Geocoder>, DEBOUNCE, 3)
}

#[tokio::test(start_paused = true)]
async fn only_the_newest_query_publishes() {
	let geocoder = Arc::new(RecordingGeocoder::default());
	let mut service = service(&geocoder);
	let rx = service.subscribe();

	service.request("Osl");
	sleep(Duration::from_millis(100)).await;
	service.request("Oslo");
	sleep(Duration::from_secs(1)).await;

	assert_eq!(geocoder.calls(), ["Oslo"]);
	assert_eq!(
		*rx.borrow(),
		Suggestions {
			query: "Oslo".to_string(),
			items: vec!["Oslo, Norge".to_string()],
		}
	);
}

#[tokio::test(start_paused = true)]
async fn in_flight_lookup_is_superseded() {
	let geocoder = Arc::new(RecordingGeocoder::default());
	let mut service = service(&geocoder);
	let rx = service.subscribe();

	service.request("Bergen");
	// Past the debounce, while the lookup itself is still running
	sleep(DEBOUNCE + Duration::from_millis(10)).await;
	service.request("Bodø");
	sleep(Duration::from_secs(1)).await;

	assert_eq!(geocoder.calls(), ["Bergen", "Bodø"]);
	assert_eq!(rx.borrow().query, "Bodø");
}

#[tokio::test(start_paused = true)]
async fn short_queries_clear_immediately() {
	let geocoder = Arc::new(RecordingGeocoder::default());
	let mut service = service(&geocoder);
	let mut rx = service.subscribe();

	service.request("Tromsø");
	service.request(" Tr ");

	assert!(rx.has_changed().unwrap());
	assert_eq!(
		*rx.borrow_and_update(),
		Suggestions {
			query: "Tr".to_string(),
			items: Vec::new(),
		}
	);

	sleep(Duration::from_secs(1)).await;
	assert!(geocoder.calls().is_empty());
	assert!(!rx.has_changed().unwrap());
}
