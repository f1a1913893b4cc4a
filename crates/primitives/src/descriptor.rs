//! Widget catalog metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::FieldType;
use crate::widget::{Settings, WidgetKey, WidgetNamespace};

/// Catalog entry describing one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDescriptor {
	pub namespace: WidgetNamespace,
	pub id: String,
	#[serde(default)]
	pub name: String,
	/// Supported normalized field types. `None` means the widget cannot edit fields.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub field_types: Option<Vec<FieldType>>,
	/// Instance parameter definitions.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub parameters: Vec<ParameterDefinition>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub installation_parameters: Option<InstallationParameters>,
	#[serde(default)]
	pub sidebar: bool,
	#[serde(default)]
	pub not_focusable: bool,
	#[serde(default)]
	pub is_background: bool,
	/// Appended to editor slot lists unless explicitly disabled.
	#[serde(default)]
	pub default_editor: bool,
	pub renderer: WidgetRenderer,
}

impl WidgetDescriptor {
	pub fn key(&self) -> WidgetKey {
		WidgetKey::new(self.namespace.clone(), self.id.clone())
	}

	/// Whether the widget declares support for `field_type`.
	pub fn supports(&self, field_type: FieldType) -> bool {
		self.field_types.as_ref().is_some_and(|types| types.contains(&field_type))
	}
}

/// A declared widget parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	#[serde(default)]
	pub required: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default: Option<Value>,
}

impl ParameterDefinition {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: None,
			kind: None,
			required: false,
			default: None,
		}
	}

	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = Some(default.into());
		self
	}
}

/// Installation-level parameter definitions and their configured values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallationParameters {
	#[serde(default)]
	pub definitions: Vec<ParameterDefinition>,
	#[serde(default)]
	pub values: Settings,
}

/// How the UI layer renders a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WidgetRenderer {
	/// A component compiled into the application.
	Builtin { component: String },
	/// A hosted document loaded from a URL.
	Hosted { src: String },
	/// An inline document.
	Inline { srcdoc: String },
}
