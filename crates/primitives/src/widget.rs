//! Widget identity and positional widget references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Widget instance settings (parameter id to value).
pub type Settings = serde_json::Map<String, Value>;

/// Namespace a widget id lives in.
///
/// Unknown namespaces are kept verbatim in [`WidgetNamespace::Other`] so that
/// configuration written by newer clients survives a read/write cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetNamespace {
	/// Field editors shipped with the application.
	Builtin,
	/// Legacy hosted UI extensions.
	Extension,
	/// Installable apps.
	App,
	/// Sidebar widgets shipped with the application.
	SidebarBuiltin,
	/// Entry editors shipped with the application.
	EditorBuiltin,
	/// Any namespace this version does not know about.
	Other(String),
}

impl WidgetNamespace {
	pub fn parse(input: &str) -> Self {
		match input {
			"builtin" => Self::Builtin,
			"extension" => Self::Extension,
			"app" => Self::App,
			"sidebar-builtin" => Self::SidebarBuiltin,
			"editor-builtin" => Self::EditorBuiltin,
			other => Self::Other(other.to_string()),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Builtin => "builtin",
			Self::Extension => "extension",
			Self::App => "app",
			Self::SidebarBuiltin => "sidebar-builtin",
			Self::EditorBuiltin => "editor-builtin",
			Self::Other(other) => other,
		}
	}

	/// Whether a field control may point into this namespace.
	pub const fn is_control_namespace(&self) -> bool {
		matches!(self, Self::Builtin | Self::Extension | Self::App)
	}

	/// Whether widgets in this namespace are hosted outside the application.
	pub const fn is_hosted(&self) -> bool {
		matches!(self, Self::Extension | Self::App)
	}
}

impl fmt::Display for WidgetNamespace {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for WidgetNamespace {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for WidgetNamespace {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		Ok(Self::parse(&raw))
	}
}

/// The `(namespace, id)` identity of a widget.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetKey {
	pub namespace: WidgetNamespace,
	pub id: String,
}

impl WidgetKey {
	pub fn new(namespace: WidgetNamespace, id: impl Into<String>) -> Self {
		Self { namespace, id: id.into() }
	}

	pub fn builtin(id: impl Into<String>) -> Self {
		Self::new(WidgetNamespace::Builtin, id)
	}

	pub fn app(id: impl Into<String>) -> Self {
		Self::new(WidgetNamespace::App, id)
	}

	pub fn extension(id: impl Into<String>) -> Self {
		Self::new(WidgetNamespace::Extension, id)
	}

	/// A reference to this widget carrying no settings.
	pub fn to_ref(&self) -> WidgetRef {
		WidgetRef::new(self.namespace.clone(), self.id.clone())
	}
}

impl fmt::Display for WidgetKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.namespace, self.id)
	}
}

/// Error parsing a `namespace/id` widget key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid widget key '{0}': expected <namespace>/<id>")]
pub struct ParseWidgetKeyError(pub String);

impl FromStr for WidgetKey {
	type Err = ParseWidgetKeyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.split_once('/') {
			Some((ns, id)) if !ns.is_empty() && !id.is_empty() => Ok(Self::new(WidgetNamespace::parse(ns), id)),
			_ => Err(ParseWidgetKeyError(s.to_string())),
		}
	}
}

/// A bare widget pointer used in sidebar and editor slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRef {
	pub widget_namespace: WidgetNamespace,
	pub widget_id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub settings: Option<Settings>,
	/// Only meaningful in editor slot lists: suppresses a default editor.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub disabled: Option<bool>,
}

impl WidgetRef {
	pub fn new(widget_namespace: WidgetNamespace, widget_id: impl Into<String>) -> Self {
		Self {
			widget_namespace,
			widget_id: widget_id.into(),
			settings: None,
			disabled: None,
		}
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn key(&self) -> WidgetKey {
		WidgetKey::new(self.widget_namespace.clone(), self.widget_id.clone())
	}

	/// Whether this reference points at `key`.
	pub fn references(&self, key: &WidgetKey) -> bool {
		self.widget_namespace == key.namespace && self.widget_id == key.id
	}

	pub fn is_disabled(&self) -> bool {
		self.disabled.unwrap_or(false)
	}
}

/// Tolerant deserializers for stored control slots.
///
/// Stored configuration is occasionally malformed; a non-string widget id or
/// namespace reads as "absent" so the synchronizer can repair it instead of
/// the whole entity failing to load.
pub(crate) mod lenient {
	use serde::{Deserialize, Deserializer};
	use serde_json::Value;

	use super::WidgetNamespace;

	pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
		Ok(match Value::deserialize(deserializer)? {
			Value::String(s) => Some(s),
			_ => None,
		})
	}

	pub fn namespace<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<WidgetNamespace>, D::Error> {
		Ok(string(deserializer)?.map(|s| WidgetNamespace::parse(&s)))
	}
}
