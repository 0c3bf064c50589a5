use clap::Args;

/// Base used for share links when none is given.
pub const DEFAULT_SHARE_BASE: &str = "https://fuel-depot.app/";

#[derive(Args, Debug, Clone)]
pub struct SitesArgs {
	/// Only list sites whose name contains this text (case-insensitive)
	#[arg(long)]
	pub filter: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SiteDeleteArgs {
	pub id: String,

	/// Skip the confirmation prompt
	#[arg(long, short, default_value_t = false)]
	pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SiteShareArgs {
	pub id: String,

	/// Page the link points to
	#[arg(long, default_value = DEFAULT_SHARE_BASE)]
	pub base: String,
}

#[derive(Args, Debug, Clone)]
pub struct NearestArgs {
	/// Coordinates as "lat,lng" or "lat lng"
	#[arg(allow_hyphen_values = true)]
	pub coords: String,

	/// Search radius in meters (defaults to the match threshold)
	#[arg(long)]
	pub radius: Option<f64>,
}
