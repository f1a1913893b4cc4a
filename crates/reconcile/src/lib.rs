//! Editor configuration reconciliation.
//!
//! Merges an installable widget's declared target state into every content
//! type's editor configuration, or removes every trace of it, without touching
//! unrelated configuration.
//!
//! The flow for [`Reconciler::apply_target_state`]:
//!
//! 1. [`validate::parse_target_state`] checks the caller's document before any I/O
//! 2. all [`ConfigurationEntity`] values are loaded through the [`EntityStore`]
//! 3. each entity is synchronized, stripped of the acting widget, and the
//!    target state re-applied ([`transform`])
//! 4. unchanged entities are skipped; the rest are written concurrently and
//!    individual write failures are absorbed and counted via [`TelemetrySink`]
//!
//! [`ConfigurationEntity`]: vellum_primitives::ConfigurationEntity

pub mod error;
pub mod reconciler;
pub mod store;
pub mod telemetry;
pub mod transform;
pub mod validate;

pub use error::{ReconcileError, Result, StoreError};
pub use reconciler::Reconciler;
pub use store::{EntityStore, StoredInterface};
pub use telemetry::{NoopTelemetry, TelemetrySink, UPDATE_DISCARDED};
pub use validate::{EDITOR_INTERFACE_KEY, ValidationError, parse_target_state, validate};
