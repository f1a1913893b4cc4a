//! Control synchronization.
//!
//! Keeps a content type's stored controls in lockstep with its fields:
//!
//! 1. one control per field, in field order ([`ControlSynchronizer`])
//! 2. missing namespaces inferred from the widget id ([`infer_namespace`])
//! 3. invalid assignments replaced by the field type's default ([`default_widget_id`])
//! 4. retired builtin widgets rewritten ([`MigrationTable`])

pub mod defaults;
pub mod migration;
pub mod namespace;
pub mod sync;

pub use defaults::{default_control, default_widget_id};
pub use migration::{MigrationRule, MigrationTable};
pub use namespace::infer_namespace;
pub use sync::ControlSynchronizer;
