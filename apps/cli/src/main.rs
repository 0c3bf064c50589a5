use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fd_core::config::{resolve_data_dir, AppConfig};

mod context;
mod domains;
mod util;

use context::{Context, OutputFormat};
use domains::{
	geocode::GeocodeCmd, history::HistoryCmd, operation::OperationCmd, site::SiteCmd,
};

#[derive(Parser, Debug)]
#[command(name = "fuel-depot", about = "Track fuel barrels stored at depot sites")]
struct Cli {
	/// Path to the fuel depot data directory (also read from FUEL_DEPOT_DATA_DIR)
	#[arg(long)]
	data_dir: Option<PathBuf>,

	/// Output format
	#[arg(long, value_enum, default_value = "human")]
	format: OutputFormat,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	#[command(flatten)]
	Operation(OperationCmd),
	#[command(flatten)]
	Site(SiteCmd),
	#[command(flatten)]
	History(HistoryCmd),
	#[command(flatten)]
	Geocode(GeocodeCmd),
	/// Show the active configuration
	Config,
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	let data_dir = resolve_data_dir(cli.data_dir)?;
	let config = AppConfig::load_from(&data_dir)?;

	init_tracing(&config.log_level);

	let mut ctx = Context::new(config, cli.format);

	match cli.command {
		Commands::Operation(cmd) => domains::operation::run(&mut ctx, cmd).await,
		Commands::Site(cmd) => domains::site::run(&mut ctx, cmd).await,
		Commands::History(cmd) => domains::history::run(&mut ctx, cmd).await,
		Commands::Geocode(cmd) => domains::geocode::run(&ctx, cmd).await,
		Commands::Config => domains::config::run(&ctx).await,
	}
}

/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing(default_filter: &str) {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let _ = tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
		.with(
			fmt::layer()
				.with_target(true)
				.with_writer(std::io::stderr),
		)
		.try_init();
}

#[cfg(test)]
mod tests {
	use super::*;

	use clap::CommandFactory;

	#[test]
	fn verify_cli() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_flat_commands() {
		let cli = Cli::try_parse_from([
			"fuel-depot",
			"--format",
			"json",
			"withdraw",
			"--qty",
			"3",
			"--at",
			"-33.9, 18.4",
		])
		.unwrap();

		assert_eq!(cli.format, OutputFormat::Json);
		assert!(matches!(
			cli.command,
			Commands::Operation(OperationCmd::Withdraw(ref args))
				if args.qty == "3" && args.at.as_deref() == Some("-33.9, 18.4")
		));

		let cli = Cli::try_parse_from(["fuel-depot", "deposit", "--site", "abc", "--qty", "2"]).unwrap();
		assert!(matches!(
			cli.command,
			Commands::Operation(OperationCmd::Deposit(ref args))
				if args.site.as_deref() == Some("abc")
		));
		assert!(
			Cli::try_parse_from(["fuel-depot", "deposit", "--site", "abc", "--at", "1,2"]).is_err()
		);

		let cli = Cli::try_parse_from(["fuel-depot", "clear", "--yes"]).unwrap();
		assert!(matches!(
			cli.command,
			Commands::History(HistoryCmd::Clear(ref args)) if args.yes
		));
	}
}
