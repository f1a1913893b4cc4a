//! Control synchronization against a content type's fields.

use std::collections::HashSet;
use std::sync::Arc;

use vellum_primitives::{Control, Field, WidgetNamespace};
use vellum_registry::BUILTINS;

use crate::defaults::{default_control, default_widget_id};
use crate::migration::{MigrationRule, MigrationTable};
use crate::namespace::infer_namespace;


/// Reconciles stored controls with the current field list.
///
/// Constructed once and reused; holds the migration table and the builtin
/// id sets used for namespace inference.
#[derive(Debug, Clone)]
pub struct ControlSynchronizer {
	migrations: MigrationTable,
	builtin_ids: HashSet<String>,
	deprecated_ids: HashSet<String>,
}

impl Default for ControlSynchronizer {
	fn default() -> Self {
		Self::new()
	}
}

impl ControlSynchronizer {
	/// A synchronizer using the builtin registry and builtin migration rules.
	pub fn new() -> Self {
		Self {
			migrations: MigrationTable::builtin(),
			builtin_ids: BUILTINS.field_editor_ids().clone(),
			deprecated_ids: BUILTINS.deprecated_ids().clone(),
		}
	}

	/// A synchronizer with explicit inputs and no registry lookups.
	pub fn with_parts(migrations: MigrationTable, builtin_ids: HashSet<String>, deprecated_ids: HashSet<String>) -> Self {
		Self {
			migrations,
			builtin_ids,
			deprecated_ids,
		}
	}

	/// Appends migration rules after the builtin ones.
	pub fn with_migrations(mut self, rules: impl IntoIterator<Item = MigrationRule>) -> Self {
		self.migrations = self.migrations.with_rules(rules);
		self
	}

	/// Marks additional widget ids as retired builtins.
	pub fn with_deprecated(mut self, ids: impl IntoIterator<Item = String>) -> Self {
		self.deprecated_ids.extend(ids);
		self
	}

	pub fn migrations(&self) -> &MigrationTable {
		&self.migrations
	}

	/// Produces exactly one control per field, in field order.
	///
	/// Controls for removed fields are dropped; fields without a control get
	/// their default editor. Every returned control has its field attached.
	pub fn synchronize(&self, fields: &[Field], existing: &[Control]) -> Vec<Control> {
		fields
			.iter()
			.map(|field| {
				let field = Arc::new(field.clone());
				match find_control(&field, existing) {
					Some(control) => self.repair(control.clone(), field),
					None => {
						tracing::trace!(field = %field.control_id(), "synthesizing default control");
						default_control(&field)
					}
				}
			})
			.collect()
	}

	/// Infers, validates and migrates one existing control.
	fn repair(&self, mut control: Control, field: Arc<Field>) -> Control {
		control.field_id = field.control_id().to_string();

		if control.widget_namespace.is_none()
			&& let Some(widget_id) = control.widget_id.as_deref()
		{
			control.widget_namespace = Some(infer_namespace(widget_id, &self.builtin_ids, &self.deprecated_ids));
		}

		let id_valid = control.widget_id.as_deref().is_some_and(|id| !id.is_empty());
		let namespace_valid = control.widget_namespace.as_ref().is_some_and(WidgetNamespace::is_control_namespace);
		if !id_valid || !namespace_valid {
			tracing::debug!(
				field = %control.field_id,
				widget = ?control.widget_id,
				namespace = ?control.widget_namespace,
				"invalid control; falling back to default widget",
			);
			control.widget_namespace = Some(WidgetNamespace::Builtin);
			control.widget_id = Some(default_widget_id(&field).to_string());
		}

		self.migrations.apply(&mut control, field.normalized_type());
		control.field = Some(field);
		control
	}
}

/// Finds the stored control for `field`: by api name first, then by internal id.
fn find_control<'a>(field: &Field, existing: &'a [Control]) -> Option<&'a Control> {
	let by_api_name = field
		.api_name
		.as_deref()
		.and_then(|api_name| existing.iter().find(|c| c.field_id == api_name));
	by_api_name.or_else(|| existing.iter().find(|c| c.field_id == field.id))
}
