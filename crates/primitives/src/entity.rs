//! Per-content-type editor configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::control::Control;
use crate::field::Field;
use crate::widget::{WidgetKey, WidgetRef};

/// A content type, as far as editor configuration is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub fields: Vec<Field>,
}

impl ContentType {
	pub fn new(id: impl Into<String>, fields: Vec<Field>) -> Self {
		let id = id.into();
		Self { name: id.clone(), id, fields }
	}
}

/// The stored editor configuration of one content type.
///
/// Structural equality is the write predicate: an entity is only persisted
/// when it differs from what was read. Keys this crate does not model are
/// kept in `extra` and take part in that comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationEntity {
	pub type_id: String,
	#[serde(default)]
	pub controls: Vec<Control>,
	/// `None` means "use the baseline sidebar".
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sidebar: Option<Vec<WidgetRef>>,
	/// `None` means "use the default entry editor".
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub editor: Option<WidgetRef>,
	/// Multi-editor slot list. Takes precedence over `editor` when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub editors: Option<Vec<WidgetRef>>,
	#[serde(flatten)]
	pub extra: serde_json::Map<String, Value>,
}

impl ConfigurationEntity {
	/// An entity with nothing configured, as created implicitly by the store.
	pub fn new(type_id: impl Into<String>) -> Self {
		Self {
			type_id: type_id.into(),
			controls: Vec::new(),
			sidebar: None,
			editor: None,
			editors: None,
			extra: serde_json::Map::new(),
		}
	}

	/// Configured editor slots: `editors` when present, otherwise the single `editor`.
	pub fn editor_slots(&self) -> Vec<WidgetRef> {
		match (&self.editors, &self.editor) {
			(Some(editors), _) => editors.clone(),
			(None, Some(editor)) => vec![editor.clone()],
			(None, None) => Vec::new(),
		}
	}

	/// Whether any control, sidebar entry or editor slot points at `key`.
	pub fn references(&self, key: &WidgetKey) -> bool {
		self.controls.iter().any(|c| c.references(key))
			|| self.sidebar.iter().flatten().any(|w| w.references(key))
			|| self.editor.as_ref().is_some_and(|w| w.references(key))
			|| self.editors.iter().flatten().any(|w| w.references(key))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;

	#[test]
	fn unknown_keys_survive_a_round_trip() {
		let raw = json!({
			"typeId": "blogPost",
			"controls": [{"fieldId": "title", "widgetNamespace": "builtin", "widgetId": "singleLine"}],
			"groupControls": [{"groupId": "g1"}],
		});
		let entity: ConfigurationEntity = serde_json::from_value(raw.clone()).unwrap();
		assert!(entity.extra.contains_key("groupControls"));
		assert_eq!(serde_json::to_value(&entity).unwrap(), raw);
	}

	#[test]
	fn editor_slots_prefer_editor_list() {
		let mut entity = ConfigurationEntity::new("ct");
		assert!(entity.editor_slots().is_empty());

		entity.editor = Some(WidgetKey::app("a").to_ref());
		assert_eq!(entity.editor_slots(), vec![WidgetKey::app("a").to_ref()]);

		entity.editors = Some(vec![WidgetKey::app("b").to_ref()]);
		assert_eq!(entity.editor_slots(), vec![WidgetKey::app("b").to_ref()]);
	}

	#[test]
	fn references_checks_every_slot() {
		let key = WidgetKey::app("w");
		let mut entity = ConfigurationEntity::new("ct");
		assert!(!entity.references(&key));
		entity.sidebar = Some(vec![key.to_ref()]);
		assert!(entity.references(&key));
	}
}
