use std::path::PathBuf;

use clap::{Args, ValueEnum};
use fd_core::export::ReportFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
	Word,
	Excel,
	Print,
	Json,
}

impl From<ReportFormatArg> for ReportFormat {
	fn from(format: ReportFormatArg) -> Self {
		match format {
			ReportFormatArg::Word => Self::Word,
			ReportFormatArg::Excel => Self::Excel,
			ReportFormatArg::Print => Self::Print,
			ReportFormatArg::Json => Self::Json,
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
	/// Report format
	#[arg(long, value_enum, default_value = "json")]
	pub format: ReportFormatArg,

	/// Where to write the report (defaults to the format's file name in the current directory)
	#[arg(long)]
	pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
	/// Skip the confirmation prompt
	#[arg(long, short, default_value_t = false)]
	pub yes: bool,
}
