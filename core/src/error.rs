//! Unified error handling for the core

use crate::{domain::SiteId, link::LinkError};

use thiserror::Error;

/// Main error type for core operations.
///
/// Validation variants are always raised before any registry or ledger mutation, so a failed
/// call never leaves a partial effect behind.
#[derive(Error, Debug)]
pub enum CoreError {
	// Validation errors
	#[error("operator is required")]
	MissingOperator,
	#[error("coordinates are missing or out of range")]
	MissingCoordinates,
	#[error("quantity must be a positive number of barrels (got {0})")]
	InvalidQuantity(u32),

	// Lookup errors
	#[error("site not found (id: {0})")]
	SiteNotFound(SiteId),

	// User must confirm destructive actions
	#[error("clearing all data requires confirmation")]
	ConfirmationRequired,

	#[error(transparent)]
	Link(#[from] LinkError),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}

impl CoreError {
	/// Whether the error came from input validation, as opposed to a lookup or I/O failure.
	#[must_use]
	pub const fn is_validation(&self) -> bool {
		matches!(
			self,
			Self::MissingOperator | Self::MissingCoordinates | Self::InvalidQuantity(_)
		)
	}
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
