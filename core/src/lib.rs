//!
//! # Fuel Depot core
//!
//! Site-resolution and ledger engine for tracking fuel barrels stored at depot sites.
//!
//! An operation (deposit or withdraw) arrives with a coordinate pair. The engine:
//! - matches it to the nearest known site within 25 meters, or registers a new site;
//! - applies the inventory delta, clamping the barrel count at zero;
//! - appends an immutable snapshot of the operation to the ledger;
//! - checkpoints the `(sites, history)` pair to a key-value store, best effort.
//!
//! Everything the presentation layer shows (totals, site lists, markers, reports, share
//! links) is derived from [`SiteRegistry`] and [`Ledger`] state through read-only accessors.
//!
//! ## Basic example
//!
//! ```
//! use fd_core::{
//! 	depot::{Depot, DepotConfig},
//! 	domain::{Action, OperationRequest},
//! 	persistence::MemoryKvStore,
//! };
//!
//! let mut depot = Depot::open(MemoryKvStore::default(), DepotConfig::default());
//!
//! let first = depot
//! 	.resolve(OperationRequest::new(Action::Deposit, "crew").qty(5).at(59.2, 9.6))
//! 	.unwrap();
//! let second = depot
//! 	.resolve(OperationRequest::new(Action::Deposit, "crew").qty(3).at(59.20001, 9.60001))
//! 	.unwrap();
//!
//! assert_eq!(first.site.id(), second.site.id());
//! assert_eq!(depot.registry().total_barrels(), 8);
//! ```

#![warn(
	clippy::all,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::dbg_macro,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod config;
pub mod depot;
pub mod domain;
pub mod error;
pub mod export;
pub mod format;
pub mod geo;
pub mod ledger;
pub mod link;
pub mod persistence;
pub mod registry;
pub mod resolver;
pub mod view;

pub use depot::{Depot, DepotConfig, Event, Outcome, Selection};
pub use domain::{Action, Coordinates, LedgerEntry, OperationRequest, Site, SiteId, Timestamp};
pub use error::{CoreError, Result};
pub use ledger::{Ledger, Order};
pub use registry::SiteRegistry;
pub use resolver::{Clock, FixedClock, OperationResolver, Resolution, SystemClock};
