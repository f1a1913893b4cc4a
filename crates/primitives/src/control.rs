//! Per-field widget assignments.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::widget::{Settings, WidgetKey, WidgetNamespace, lenient};

/// One field's widget assignment inside a [`ConfigurationEntity`].
///
/// `widget_namespace` and `widget_id` are optional because stored controls may
/// predate namespaces or be malformed; the synchronizer fills them in.
///
/// [`ConfigurationEntity`]: crate::ConfigurationEntity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
	pub field_id: String,
	#[serde(default, deserialize_with = "lenient::namespace", skip_serializing_if = "Option::is_none")]
	pub widget_namespace: Option<WidgetNamespace>,
	#[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
	pub widget_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub settings: Option<Settings>,
	/// Live field definition, attached during synchronization. Never persisted.
	#[serde(skip)]
	pub field: Option<Arc<Field>>,
}

impl Control {
	/// A control with no widget assigned.
	pub fn unassigned(field_id: impl Into<String>) -> Self {
		Self {
			field_id: field_id.into(),
			..Self::default()
		}
	}

	/// A control pointing at `key` with no settings.
	pub fn assigned(field_id: impl Into<String>, key: &WidgetKey) -> Self {
		Self {
			field_id: field_id.into(),
			widget_namespace: Some(key.namespace.clone()),
			widget_id: Some(key.id.clone()),
			settings: None,
			field: None,
		}
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// The widget this control points at, if both namespace and id are set.
	pub fn key(&self) -> Option<WidgetKey> {
		Some(WidgetKey::new(self.widget_namespace.clone()?, self.widget_id.clone()?))
	}

	/// Whether this control points at `key`.
	pub fn references(&self, key: &WidgetKey) -> bool {
		self.widget_namespace.as_ref() == Some(&key.namespace) && self.widget_id.as_deref() == Some(key.id.as_str())
	}
}

/// Attached field definitions are transient and excluded from comparison.
impl PartialEq for Control {
	fn eq(&self, other: &Self) -> bool {
		self.field_id == other.field_id
			&& self.widget_namespace == other.widget_namespace
			&& self.widget_id == other.widget_id
			&& self.settings == other.settings
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn malformed_widget_slots_read_as_absent() {
		let control: Control = serde_json::from_value(json!({
			"fieldId": "title",
			"widgetNamespace": 42,
			"widgetId": ["x"]
		}))
		.unwrap();
		assert_eq!(control, Control::unassigned("title"));
	}

	#[test]
	fn attached_field_is_not_serialized_or_compared() {
		let mut with_field = Control::assigned("title", &WidgetKey::builtin("singleLine"));
		with_field.field = Some(Arc::new(Field::new("title", "Symbol")));
		let without = Control::assigned("title", &WidgetKey::builtin("singleLine"));
		assert_eq!(with_field, without);
		assert_eq!(
			serde_json::to_value(&with_field).unwrap(),
			json!({"fieldId": "title", "widgetNamespace": "builtin", "widgetId": "singleLine"})
		);
	}
}
