use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Subcommand;
use fd_core::Coordinates;
use fd_geocode::{Geocoder, SuggestionService};

use crate::context::Context;
use crate::util::prelude::*;

#[derive(Subcommand, Debug)]
pub enum GeocodeCmd {
	/// Look up the coordinates of an address or place
	Geocode { query: String },
	/// List addresses matching a partial query
	Suggest { query: String },
}

pub async fn run(ctx: &Context, cmd: GeocodeCmd) -> Result<()> {
	let geocoder = ctx.geocoder()?;

	match cmd {
		GeocodeCmd::Geocode { query } => {
			let found = geocoder.forward_geocode(&query).await;

			print_output!(ctx, found, |found: Option<Coordinates>| match found {
				Some(at) => println!("{at}"),
				None => println!("Address not found"),
			});
		}
		GeocodeCmd::Suggest { query } => {
			let settings = &ctx.config.geocoding;
			let mut service = SuggestionService::new(
				Arc::new(geocoder) as Arc<dyn Geocoder>,
				Duration::from_millis(settings.debounce_ms),
				settings.min_query_len,
			);
			let mut rx = service.subscribe();

			service.request(&query);
			rx.changed().await?;
			let suggestions = rx.borrow_and_update().clone();

			print_output!(ctx, suggestions.items, |items: Vec<String>| {
				if items.is_empty() {
					println!("No suggestions");
				}
				for item in items {
					println!("{item}");
				}
			});
		}
	}

	Ok(())
}
