//! Domain types shared by every engine component.

mod coordinates;
mod operation;
mod site;

pub use coordinates::{Coordinates, CoordinatesParseError};
pub use operation::{coerce_quantity, parse_quantity, Action, LedgerEntry, OperationRequest, Timestamp};
pub use site::{Site, SiteId};
