//! Default field editors.

use std::sync::Arc;

use vellum_primitives::{Control, Field, FieldType, WidgetNamespace};

/// The builtin editor a field gets when nothing (valid) is configured.
pub fn default_widget_id(field: &Field) -> &'static str {
	let Some(field_type) = field.normalized_type() else {
		return "singleLine";
	};
	match field_type {
		FieldType::Symbol if field.control_id() == "slug" => "slugEditor",
		FieldType::Symbol => "singleLine",
		FieldType::Text => "markdown",
		FieldType::RichText => "richTextEditor",
		FieldType::Integer | FieldType::Number => "numberEditor",
		FieldType::Boolean => "boolean",
		FieldType::Date => "datePicker",
		FieldType::Location => "locationEditor",
		FieldType::Object => "objectEditor",
		FieldType::Entry => "entryLinkEditor",
		FieldType::Asset => "assetLinkEditor",
		FieldType::File => "fileEditor",
		FieldType::Symbols => "tagEditor",
		FieldType::Entries => "entryLinksEditor",
		FieldType::Assets => "assetLinksEditor",
	}
}

/// A control assigning the field's default builtin editor, field attached.
pub fn default_control(field: &Arc<Field>) -> Control {
	Control {
		field_id: field.control_id().to_string(),
		widget_namespace: Some(WidgetNamespace::Builtin),
		widget_id: Some(default_widget_id(field).to_string()),
		settings: None,
		field: Some(Arc::clone(field)),
	}
}
