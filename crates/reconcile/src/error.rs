//! Reconciliation error types.

use crate::validate::ValidationError;

/// A convenient type alias for `Result` with `E` = [`ReconcileError`].
pub type Result<T, E = ReconcileError> = std::result::Result<T, E>;

/// Fatal reconciliation failures. Per-entity write failures are not errors;
/// they are absorbed by the batch and reported through telemetry.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
	/// The target state document is malformed. Raised before any I/O.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Loading the batch of editor interfaces failed.
	#[error("failed to load editor interfaces: {0}")]
	Fetch(#[source] StoreError),
	/// References were removed but the installation could not be deleted.
	#[error("failed to delete installation {id}: {source}")]
	Uninstall {
		id: String,
		#[source]
		source: StoreError,
	},
}

/// Errors surfaced by an [`EntityStore`](crate::EntityStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	#[error("not found: {0}")]
	NotFound(String),
	/// The stored version moved since it was read.
	#[error("version conflict on {0}")]
	Conflict(String),
	#[error("{0}")]
	Backend(String),
}
