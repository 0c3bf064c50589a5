use anyhow::Result;
use fd_core::config::AppConfig;

use crate::context::Context;
use crate::util::prelude::*;

/// Shows the active configuration and where it lives.
pub async fn run(ctx: &Context) -> Result<()> {
	print_output!(ctx, &ctx.config, |config: &AppConfig| {
		let mut table = new_table(["Key", "Value"]);

		let matching = &config.matching;
		let geocoding = &config.geocoding;
		let view = &config.default_view;
		let rows = [
			("version", config.version.to_string()),
			("data_dir", config.data_dir.display().to_string()),
			("log_level", config.log_level.clone()),
			("matching.match_threshold_m", matching.match_threshold_m.to_string()),
			("matching.prefill_threshold_m", matching.prefill_threshold_m.to_string()),
			("liters_per_barrel", config.liters_per_barrel.to_string()),
			("default_operator", config.default_operator.clone()),
			(
				"default_view",
				format!("{}, {} (zoom {})", view.lat, view.lng, view.zoom),
			),
			("geocoding.endpoint", geocoding.endpoint.clone()),
			("geocoding.country_codes", geocoding.country_codes.clone()),
			("geocoding.suggestion_limit", geocoding.suggestion_limit.to_string()),
			("geocoding.min_query_len", geocoding.min_query_len.to_string()),
			("geocoding.debounce_ms", geocoding.debounce_ms.to_string()),
			("geocoding.user_agent", geocoding.user_agent.clone()),
		];
		for (key, value) in rows {
			table.add_row(vec![key.to_string(), value]);
		}

		println!("{table}");
		println!();
		println!("Config file: {}", config.config_path().display());
	});

	Ok(())
}
