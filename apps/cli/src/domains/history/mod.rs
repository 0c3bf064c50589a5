mod args;

use std::{fs, path::PathBuf};

use anyhow::{Context as _, Result};
use clap::Subcommand;
use fd_core::{
	export::ReportFormat,
	format::{coords, local_time, thousands},
	view::Totals,
	Event, LedgerEntry, Order,
};
use serde::Serialize;

use crate::context::Context;
use crate::util::prelude::*;

pub use self::args::*;

#[derive(Subcommand, Debug)]
pub enum HistoryCmd {
	/// Show every operation, newest first
	History,
	/// Show total barrels and liters across all sites
	Totals,
	/// Write a report of all sites and the history
	Export(ExportArgs),
	/// Delete every site and the whole history
	Clear(ClearArgs),
}

#[derive(Serialize)]
struct ExportOutput {
	path: PathBuf,
	mime: &'static str,
	bytes: usize,
}

pub async fn run(ctx: &mut Context, cmd: HistoryCmd) -> Result<()> {
	match cmd {
		HistoryCmd::History => {
			let entries = ctx.depot.history(Order::Descending);
			let liters_per_barrel = ctx.depot.config().liters_per_barrel;

			print_output!(ctx, entries, |entries: Vec<&LedgerEntry>| {
				if entries.is_empty() {
					println!("No operations yet.");
					return;
				}

				let mut table = new_table([
					"Time", "Action", "Qty", "Liters", "Operator", "Site", "Coords",
				]);
				for entry in entries {
					table.add_row(vec![
						local_time(entry.ts()),
						entry.action().to_string().to_uppercase(),
						thousands(u64::from(entry.qty())),
						thousands(u64::from(entry.qty()).saturating_mul(liters_per_barrel)),
						entry.operator().to_string(),
						entry.site_name().to_string(),
						coords(entry.lat(), entry.lng()),
					]);
				}
				println!("{table}");
			});
		}
		HistoryCmd::Totals => {
			print_output!(ctx, ctx.depot.totals(), |t: Totals| {
				println!("{}", t.share_text());
			});
		}
		HistoryCmd::Export(args) => {
			let format = ReportFormat::from(args.format);
			let report = ctx.depot.export(format)?;
			let path = args
				.out
				.unwrap_or_else(|| PathBuf::from(report.file_name));

			fs::write(&path, &report.body)
				.with_context(|| format!("Failed to write report to {}", path.display()))?;

			let output = ExportOutput {
				path,
				mime: report.mime,
				bytes: report.body.len(),
			};
			print_output!(ctx, output, |o: ExportOutput| {
				println!("Wrote {format} report to {}", o.path.display());
			});
		}
		HistoryCmd::Clear(args) => {
			confirm_or_abort("Clear all sites and history?", args.yes)?;

			let outcome = ctx.depot.dispatch(Event::ClearAll { confirmed: true })?;
			print_output!(ctx, outcome.notification(), |n: Option<String>| {
				println!("{}", n.unwrap_or_default());
			});
		}
	}

	Ok(())
}
