//! Downloadable reports of sites and history.

use std::fmt::Write as _;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::{
	domain::{LedgerEntry, Site},
	error::Result,
	format::{coords, escape_html, local_time, thousands},
	ledger::{Ledger, Order},
	registry::SiteRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
	/// HTML saved with a `.doc` extension, opened by word processors.
	Word,
	/// HTML saved with a `.xls` extension, opened by spreadsheets.
	Excel,
	/// Standalone HTML page that prints itself on load.
	Print,
	/// Raw `{sites, history}` dump.
	Json,
}

impl ReportFormat {
	#[must_use]
	pub const fn file_name(self) -> &'static str {
		match self {
			Self::Word => "fuel-report.doc",
			Self::Excel => "fuel-report.xls",
			Self::Print => "fuel-report.html",
			Self::Json => "fuel-depot-export.json",
		}
	}

	#[must_use]
	pub const fn mime(self) -> &'static str {
		match self {
			Self::Word => "application/msword",
			Self::Excel => "application/vnd.ms-excel",
			Self::Print => "text/html",
			Self::Json => "application/json",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
	pub file_name: &'static str,
	pub mime: &'static str,
	pub body: String,
}

#[derive(Serialize)]
struct JsonDump<'a> {
	sites: &'a [Site],
	history: &'a [LedgerEntry],
}

/// Renders every site (in registry order) and the history (newest first).
pub fn render(
	format: ReportFormat,
	registry: &SiteRegistry,
	ledger: &Ledger,
	liters_per_barrel: u64,
) -> Result<Report> {
	let body = match format {
		ReportFormat::Json => serde_json::to_string_pretty(&JsonDump {
			sites: registry.sites(),
			history: ledger.entries(),
		})?,
		ReportFormat::Word => format!(
			"<!doctype html><html><head><meta charset=\"UTF-8\"></head><body>\n\
			<h2>Fuel Sites</h2>{}\n<h2>Operations History</h2>{}\n</body></html>",
			sites_table(registry, liters_per_barrel),
			history_table(ledger),
		),
		ReportFormat::Excel => format!(
			"<!doctype html><html xmlns:o=\"urn:schemas-microsoft-com:office:office\" \
			xmlns:x=\"urn:schemas-microsoft-com:office:excel\" \
			xmlns=\"http://www.w3.org/TR/REC-html40\">\n\
			<head><meta charset=\"UTF-8\"></head><body>\n\
			<h3>Fuel Sites</h3>{}\n<h3>Operations History</h3>{}\n</body></html>",
			sites_table(registry, liters_per_barrel),
			history_table(ledger),
		),
		ReportFormat::Print => format!(
			"<!doctype html><html><head><meta charset=\"UTF-8\"><title>Fuel Report</title>\n\
			<style>body{{font-family:Arial,Helvetica,sans-serif;padding:20px}}h2{{margin:8px 0}}\n\
			table{{border-collapse:collapse;width:100%}}\
			th,td{{border:1px solid #999;padding:6px;font-size:12px}}</style>\n\
			</head><body>\n\
			<h2>Fuel Sites</h2>{}\n<h2>Operations History</h2>{}\n\
			<script>window.onload=()=>window.print();</script>\n</body></html>",
			sites_table(registry, liters_per_barrel),
			history_table(ledger),
		),
	};

	Ok(Report {
		file_name: format.file_name(),
		mime: format.mime(),
		body,
	})
}

fn sites_table(registry: &SiteRegistry, liters_per_barrel: u64) -> String {
	let mut rows = String::new();
	for site in registry.sites() {
		let _ = write!(
			rows,
			"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
			escape_html(site.name()),
			coords(site.lat(), site.lng()),
			thousands(site.barrels()),
			thousands(site.barrels().saturating_mul(liters_per_barrel)),
		);
	}
	if rows.is_empty() {
		rows.push_str("<tr><td colspan=\"4\">No sites</td></tr>");
	}

	format!(
		"<table><thead><tr><th>Name</th><th>Coords</th><th>Barrels</th><th>Liters</th></tr>\
		</thead><tbody>{rows}</tbody></table>"
	)
}

fn history_table(ledger: &Ledger) -> String {
	let mut rows = String::new();
	for entry in ledger.entries_by_time(Order::Descending) {
		let _ = write!(
			rows,
			"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
			local_time(entry.ts()),
			entry.action(),
			thousands(u64::from(entry.qty())),
			escape_html(entry.operator()),
			escape_html(entry.site_name()),
			coords(entry.lat(), entry.lng()),
		);
	}
	if rows.is_empty() {
		rows.push_str("<tr><td colspan=\"6\">No history</td></tr>");
	}

	format!(
		"<table><thead><tr><th>Time</th><th>Action</th><th>Qty</th><th>Operator</th>\
		<th>Site</th><th>Coords</th></tr></thead><tbody>{rows}</tbody></table>"
	)
}
