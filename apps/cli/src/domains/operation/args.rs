use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct OperationArgs {
	/// Who performed the operation (defaults to the configured operator)
	#[arg(long)]
	pub operator: Option<String>,

	/// Number of barrels; anything that is not a positive number counts as 1
	#[arg(long, default_value = "1", allow_hyphen_values = true)]
	pub qty: String,

	/// Site name or address. Renames a matched site, and is geocoded when `--at` is missing
	#[arg(long)]
	pub name: Option<String>,

	/// Coordinates as "lat,lng" or "lat lng"
	#[arg(long, allow_hyphen_values = true)]
	pub at: Option<String>,

	/// Id of an existing site; reuses its coordinates and name
	#[arg(long, conflicts_with_all = ["at", "name"])]
	pub site: Option<String>,
}
