mod args;

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;
use fd_core::{
	domain::parse_quantity, Action, Coordinates, Event, LedgerEntry, OperationRequest, Outcome,
	Site, SiteId,
};
use fd_geocode::Geocoder;
use serde::Serialize;
use tracing::info;

use crate::context::Context;
use crate::util::prelude::*;

pub use self::args::*;

#[derive(Subcommand, Debug)]
pub enum OperationCmd {
	/// Store barrels at a site, creating the site if needed
	Deposit(OperationArgs),
	/// Take barrels from a site; stock never goes below zero
	Withdraw(OperationArgs),
}

#[derive(Serialize)]
struct OperationOutput<'a> {
	site: &'a Site,
	entry: &'a LedgerEntry,
	notification: Option<String>,
}

pub async fn run(ctx: &mut Context, cmd: OperationCmd) -> Result<()> {
	let (action, args) = match cmd {
		OperationCmd::Deposit(args) => (Action::Deposit, args),
		OperationCmd::Withdraw(args) => (Action::Withdraw, args),
	};

	let outcome = match args.site.clone() {
		Some(site_id) => quick_operation(ctx, action, args, SiteId::from(site_id))?,
		None => submit(ctx, action, args).await?,
	};
	let Outcome::Committed(resolution) = &outcome else {
		bail!("operation was not committed");
	};

	let output = OperationOutput {
		site: &resolution.site,
		entry: &resolution.entry,
		notification: outcome.notification(),
	};

	print_output!(ctx, output, |o: OperationOutput<'_>| {
		if let Some(notification) = o.notification {
			println!("{notification}");
		}
		println!(
			"Site {}: {} barrel(s) at {}",
			o.site.id(),
			o.site.barrels(),
			fd_core::format::coords(o.site.lat(), o.site.lng())
		);
	});

	Ok(())
}

/// Same as the deposit/withdraw buttons on a site's marker.
fn quick_operation(
	ctx: &mut Context,
	action: Action,
	args: OperationArgs,
	site_id: SiteId,
) -> Result<Outcome> {
	ctx.depot.dispatch(Event::MarkerClick {
		site_id: site_id.clone(),
	})?;

	Ok(ctx.depot.dispatch(Event::QuickOperation {
		site_id,
		action,
		qty: parse_quantity(&args.qty),
		operator: args.operator,
	})?)
}

/// Same as filling in the operation form after picking a point.
async fn submit(ctx: &mut Context, action: Action, args: OperationArgs) -> Result<Outcome> {
	select_point(ctx, &args).await?;

	let operator = args
		.operator
		.unwrap_or_else(|| ctx.config.default_operator.clone());
	let mut request = OperationRequest::new(action, operator);
	request.qty = parse_quantity(&args.qty);
	request.name = args.name;

	// Coordinates, and a nearby site's name when none was given, come from the selection
	Ok(ctx.depot.dispatch(Event::Submit(request))?)
}

/// `--at` picks a point like a map click; otherwise the name is looked up as an address.
async fn select_point(ctx: &mut Context, args: &OperationArgs) -> Result<()> {
	if let Some(text) = args.at.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
		let at = text
			.parse::<Coordinates>()
			.map_err(|e| anyhow!("Invalid coordinates. Use \"lat,lng\". ({e})"))?;
		ctx.depot.dispatch(Event::MapClick {
			lat: at.lat(),
			lng: at.lng(),
		})?;

		return Ok(());
	}

	if let Some(name) = args.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
		if let Some(at) = ctx.geocoder()?.forward_geocode(name).await {
			info!(%at, "coordinates set from address");
			ctx.depot.dispatch(Event::SelectCoordinates {
				lat: at.lat(),
				lng: at.lng(),
			})?;

			return Ok(());
		}
	}

	bail!("Set coordinates")
}

#[cfg(test)]
mod tests {
	use super::*;

	use fd_core::config::AppConfig;
	use pretty_assertions::assert_eq;
	use tempfile::tempdir;

	use crate::context::OutputFormat;

	fn args(at: Option<&str>, site: Option<&str>, qty: &str) -> OperationArgs {
		OperationArgs {
			operator: None,
			qty: qty.to_string(),
			name: None,
			at: at.map(str::to_string),
			site: site.map(str::to_string),
		}
	}

	#[tokio::test]
	async fn site_id_runs_a_quick_operation() {
		let dir = tempdir().unwrap();
		let mut ctx = Context::new(
			AppConfig::default_with_dir(dir.path().to_path_buf()),
			OutputFormat::Json,
		);

		run(
			&mut ctx,
			OperationCmd::Deposit(args(Some("60.0, 10.0"), None, "7")),
		)
		.await
		.unwrap();
		let site_id = ctx.depot.registry().sites()[0].id().to_string();

		run(
			&mut ctx,
			OperationCmd::Withdraw(args(None, Some(&site_id), "2")),
		)
		.await
		.unwrap();

		let site = &ctx.depot.registry().sites()[0];
		assert_eq!(ctx.depot.registry().len(), 1);
		assert_eq!(site.barrels(), 5);
		assert_eq!(ctx.depot.ledger().entries()[1].operator(), "crew");
	}

	#[tokio::test]
	async fn unknown_site_id_is_rejected() {
		let dir = tempdir().unwrap();
		let mut ctx = Context::new(
			AppConfig::default_with_dir(dir.path().to_path_buf()),
			OutputFormat::Json,
		);

		let result = run(
			&mut ctx,
			OperationCmd::Deposit(args(None, Some("missing"), "1")),
		)
		.await;

		assert!(result.is_err());
		assert!(ctx.depot.ledger().is_empty());
	}

	#[tokio::test]
	async fn coordinates_pick_up_a_nearby_site_name() {
		let dir = tempdir().unwrap();
		let mut ctx = Context::new(
			AppConfig::default_with_dir(dir.path().to_path_buf()),
			OutputFormat::Json,
		);
		let mut named = args(Some("59.2, 9.6"), None, "1");
		named.name = Some("North pad".to_string());
		run(&mut ctx, OperationCmd::Deposit(named)).await.unwrap();

		// About 28 m north: a new site, named after its neighbour
		run(
			&mut ctx,
			OperationCmd::Deposit(args(Some("59.20025, 9.6"), None, "1")),
		)
		.await
		.unwrap();

		let names = ctx
			.depot
			.registry()
			.sites()
			.iter()
			.map(Site::name)
			.collect::<Vec<_>>();
		assert_eq!(names, ["North pad", "North pad"]);
	}
}
