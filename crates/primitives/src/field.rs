//! Content type fields and normalized field types.

use serde::{Deserialize, Serialize};

/// A content type field definition as stored by the content model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
	/// Internal, immutable field id.
	pub id: String,
	/// Public API name. Controls are keyed by this when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_name: Option<String>,
	#[serde(default)]
	pub name: String,
	/// Raw content model type (`Symbol`, `Link`, `Array`, ...).
	#[serde(rename = "type")]
	pub field_type: String,
	/// Target of a `Link` field (`Entry` or `Asset`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link_type: Option<String>,
	/// Item definition of an `Array` field.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub items: Option<FieldItems>,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub disabled: bool,
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub omitted: bool,
}

/// Item definition of an `Array` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldItems {
	#[serde(rename = "type")]
	pub item_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link_type: Option<String>,
}

impl Field {
	/// Creates a field of the given raw type with no api name.
	pub fn new(id: impl Into<String>, field_type: impl Into<String>) -> Self {
		let id = id.into();
		Self {
			name: id.clone(),
			id,
			api_name: None,
			field_type: field_type.into(),
			link_type: None,
			items: None,
			disabled: false,
			omitted: false,
		}
	}

	/// Sets the public api name.
	pub fn with_api_name(mut self, api_name: impl Into<String>) -> Self {
		self.api_name = Some(api_name.into());
		self
	}

	/// Sets the link target of a `Link` field.
	pub fn with_link_type(mut self, link_type: impl Into<String>) -> Self {
		self.link_type = Some(link_type.into());
		self
	}

	/// Sets the item definition of an `Array` field.
	pub fn with_items(mut self, item_type: impl Into<String>, link_type: Option<&str>) -> Self {
		self.items = Some(FieldItems {
			item_type: item_type.into(),
			link_type: link_type.map(str::to_string),
		});
		self
	}

	/// The id a control uses to reference this field: api name, falling back to the internal id.
	pub fn control_id(&self) -> &str {
		self.api_name.as_deref().unwrap_or(&self.id)
	}

	/// Collapses the raw `type`/`linkType`/`items` triple into one [`FieldType`].
	///
	/// Returns `None` for shapes the content model does not define, such as a
	/// `Link` without a link type or an `Array` of numbers.
	pub fn normalized_type(&self) -> Option<FieldType> {
		FieldType::from_raw(&self.field_type, self.link_type.as_deref(), self.items.as_ref())
	}
}

/// Normalized field type used for widget compatibility and defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
	Symbol,
	Text,
	RichText,
	Integer,
	Number,
	Boolean,
	Date,
	Location,
	Object,
	Entry,
	Asset,
	File,
	Symbols,
	Entries,
	Assets,
}

impl FieldType {
	/// Every normalized type, in declaration order.
	pub const ALL: [Self; 15] = [
		Self::Symbol,
		Self::Text,
		Self::RichText,
		Self::Integer,
		Self::Number,
		Self::Boolean,
		Self::Date,
		Self::Location,
		Self::Object,
		Self::Entry,
		Self::Asset,
		Self::File,
		Self::Symbols,
		Self::Entries,
		Self::Assets,
	];

	fn from_raw(field_type: &str, link_type: Option<&str>, items: Option<&FieldItems>) -> Option<Self> {
		match field_type {
			"Symbol" => Some(Self::Symbol),
			"Text" => Some(Self::Text),
			"RichText" => Some(Self::RichText),
			"Integer" => Some(Self::Integer),
			"Number" => Some(Self::Number),
			"Boolean" => Some(Self::Boolean),
			"Date" => Some(Self::Date),
			"Location" => Some(Self::Location),
			"Object" => Some(Self::Object),
			"File" => Some(Self::File),
			"Link" => match link_type? {
				"Entry" => Some(Self::Entry),
				"Asset" => Some(Self::Asset),
				_ => None,
			},
			"Array" => {
				let items = items?;
				match (items.item_type.as_str(), items.link_type.as_deref()) {
					("Symbol", _) => Some(Self::Symbols),
					("Link", Some("Entry")) => Some(Self::Entries),
					("Link", Some("Asset")) => Some(Self::Assets),
					_ => None,
				}
			}
			_ => None,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Symbol => "Symbol",
			Self::Text => "Text",
			Self::RichText => "RichText",
			Self::Integer => "Integer",
			Self::Number => "Number",
			Self::Boolean => "Boolean",
			Self::Date => "Date",
			Self::Location => "Location",
			Self::Object => "Object",
			Self::Entry => "Entry",
			Self::Asset => "Asset",
			Self::File => "File",
			Self::Symbols => "Symbols",
			Self::Entries => "Entries",
			Self::Assets => "Assets",
		}
	}
}

impl std::fmt::Display for FieldType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn links_and_arrays_normalize() {
		assert_eq!(Field::new("a", "Link").with_link_type("Entry").normalized_type(), Some(FieldType::Entry));
		assert_eq!(Field::new("a", "Link").with_link_type("Asset").normalized_type(), Some(FieldType::Asset));
		assert_eq!(Field::new("a", "Array").with_items("Symbol", None).normalized_type(), Some(FieldType::Symbols));
		assert_eq!(Field::new("a", "Array").with_items("Link", Some("Entry")).normalized_type(), Some(FieldType::Entries));
		assert_eq!(Field::new("a", "Array").with_items("Link", Some("Asset")).normalized_type(), Some(FieldType::Assets));
	}

	#[test]
	fn malformed_shapes_have_no_type() {
		assert_eq!(Field::new("a", "Link").normalized_type(), None);
		assert_eq!(Field::new("a", "Array").normalized_type(), None);
		assert_eq!(Field::new("a", "Array").with_items("Integer", None).normalized_type(), None);
		assert_eq!(Field::new("a", "Widget").normalized_type(), None);
	}

	#[test]
	fn control_id_prefers_api_name() {
		let field = Field::new("xyz1", "Symbol").with_api_name("title");
		assert_eq!(field.control_id(), "title");
		assert_eq!(Field::new("xyz1", "Symbol").control_id(), "xyz1");
	}

	#[test]
	fn field_deserializes_from_content_model_json() {
		let field: Field = serde_json::from_value(serde_json::json!({
			"id": "f1",
			"apiName": "tags",
			"name": "Tags",
			"type": "Array",
			"items": { "type": "Symbol" }
		}))
		.unwrap();
		assert_eq!(field.control_id(), "tags");
		assert_eq!(field.normalized_type(), Some(FieldType::Symbols));
	}
}
