mod args;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use fd_core::{geo::distance_m, link::MapView, view::SiteRow, Coordinates, Event, Site, SiteId};
use serde::Serialize;

use crate::context::Context;
use crate::util::prelude::*;

pub use self::args::*;

#[derive(Subcommand, Debug)]
pub enum SiteCmd {
	/// List sites, fullest first
	Sites(SitesArgs),
	/// Rename a site; an empty name clears it
	Rename { id: String, name: String },
	/// Delete a site. Its history is kept
	Delete(SiteDeleteArgs),
	/// Print a link that opens the map on a site
	Share(SiteShareArgs),
	/// Show where a shared link opens the map
	Open { url: String },
	/// Find the site closest to a coordinate pair
	Nearest(NearestArgs),
}

#[derive(Serialize)]
struct NearestOutput<'a> {
	site: Option<&'a Site>,
	distance_m: Option<f64>,
	radius_m: f64,
}

pub async fn run(ctx: &mut Context, cmd: SiteCmd) -> Result<()> {
	match cmd {
		SiteCmd::Sites(args) => {
			let rows = ctx.depot.site_list(args.filter.as_deref().unwrap_or_default());

			print_output!(ctx, rows, |rows: Vec<SiteRow>| {
				if rows.is_empty() {
					println!("No sites.");
					return;
				}

				let mut table = new_table(["Id", "Name", "Coords", "Barrels", "Liters", ""]);
				for row in rows {
					table.add_row(vec![
						row.id.to_string(),
						row.name,
						row.coords,
						fd_core::format::thousands(row.barrels),
						fd_core::format::thousands(row.liters),
						if row.is_empty { "empty" } else { "" }.to_string(),
					]);
				}
				println!("{table}");
			});
		}
		SiteCmd::Rename { id, name } => {
			let outcome = ctx.depot.dispatch(Event::RenameSite {
				site_id: SiteId::from(id),
				name,
			})?;

			print_output!(ctx, outcome.notification(), |n: Option<String>| {
				println!("{}", n.unwrap_or_default());
			});
		}
		SiteCmd::Delete(args) => {
			let site_id = SiteId::from(args.id);
			let site = ctx
				.depot
				.registry()
				.get(&site_id)
				.ok_or_else(|| anyhow!("Site {site_id} not found"))?;

			confirm_or_abort(
				&format!(
					"Delete site {} ({} barrel(s))? Its history is kept.",
					site.display_name().unwrap_or(site_id.as_str()),
					site.barrels()
				),
				args.yes,
			)?;

			let outcome = ctx.depot.dispatch(Event::DeleteSite { site_id })?;
			print_output!(ctx, outcome.notification(), |n: Option<String>| {
				println!("{}", n.unwrap_or_default());
			});
		}
		SiteCmd::Share(args) => {
			let link = ctx.depot.share_link(&args.base, &SiteId::from(args.id))?;

			print_output!(ctx, link.as_str(), |link: &str| println!("{link}"));
		}
		SiteCmd::Open { url } => {
			let view = ctx.depot.resolve_deep_link(&url);

			print_output!(ctx, view, |v: MapView| {
				println!(
					"Map view: {} (zoom {})",
					fd_core::format::coords(v.lat, v.lng),
					v.zoom
				);
			});
		}
		SiteCmd::Nearest(args) => {
			let point = args
				.coords
				.parse::<Coordinates>()
				.map_err(|e| anyhow!("Invalid coordinates. Use \"lat,lng\". ({e})"))?;
			let radius_m = args
				.radius
				.unwrap_or_else(|| ctx.depot.registry().match_threshold_m());

			let site = ctx.depot.registry().nearest(point, radius_m);
			let output = NearestOutput {
				site,
				distance_m: site.map(|site| distance_m((point.lat(), point.lng()), site.position())),
				radius_m,
			};

			print_output!(ctx, output, |o: NearestOutput<'_>| match (o.site, o.distance_m) {
				(Some(site), Some(distance)) => println!(
					"{} ({}) is {distance:.1} m away with {} barrel(s)",
					site.display_name().unwrap_or("Unnamed site"),
					site.id(),
					site.barrels()
				),
				_ => println!("No site within {} m", o.radius_m),
			});
		}
	}

	Ok(())
}
