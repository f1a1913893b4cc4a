//! Builtin widget registry.
//!
//! Pure data: field editors (`builtin`), sidebar widgets (`sidebar-builtin`)
//! and entry editors (`editor-builtin`). Built once per process on first access.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use serde_json::Value;
use vellum_primitives::{FieldType, ParameterDefinition, WidgetDescriptor, WidgetKey, WidgetNamespace, WidgetRef, WidgetRenderer};

use FieldType::*;

/// Builtin field editor ids that are no longer offered but may still appear
/// in stored configuration. They are recognized for namespace inference and
/// rewritten by the migration table.
pub const DEPRECATED_FIELD_EDITORS: &[&str] = &[
	"sectionHeading",
	"ooyalaEditor",
	"ooyalaMultiAssetEditor",
	"kalturaEditor",
	"kalturaMultiVideoEditor",
	"entryCardEditor",
	"entryCardsEditor",
	"assetGalleryEditor",
];

/// Sidebar widget ids in baseline order.
const DEFAULT_SIDEBAR: &[&str] = &[
	"publication-widget",
	"releases-widget",
	"content-workflow-tasks-widget",
	"content-preview-widget",
	"incoming-links-widget",
	"translation-widget",
	"versions-widget",
];

/// The process-wide builtin registry.
pub static BUILTINS: LazyLock<BuiltinRegistry> = LazyLock::new(BuiltinRegistry::build);

/// Indexed collection of every builtin widget descriptor.
#[derive(Debug)]
pub struct BuiltinRegistry {
	widgets: Vec<Arc<WidgetDescriptor>>,
	index: HashMap<WidgetKey, Arc<WidgetDescriptor>>,
	field_editor_ids: HashSet<String>,
	deprecated_ids: HashSet<String>,
}

impl BuiltinRegistry {
	fn build() -> Self {
		let widgets: Vec<Arc<WidgetDescriptor>> = field_editors()
			.into_iter()
			.chain(sidebar_widgets())
			.chain(editor_widgets())
			.map(Arc::new)
			.collect();

		let mut index = HashMap::with_capacity(widgets.len());
		for widget in &widgets {
			let previous = index.insert(widget.key(), Arc::clone(widget));
			debug_assert!(previous.is_none(), "duplicate builtin widget {}", widget.key());
		}

		let field_editor_ids = widgets
			.iter()
			.filter(|w| w.namespace == WidgetNamespace::Builtin)
			.map(|w| w.id.clone())
			.collect();
		let deprecated_ids = DEPRECATED_FIELD_EDITORS.iter().map(|id| id.to_string()).collect();

		tracing::debug!(count = widgets.len(), "builtin widget registry built");
		Self {
			widgets,
			index,
			field_editor_ids,
			deprecated_ids,
		}
	}

	/// Looks up a builtin by key.
	pub fn get(&self, key: &WidgetKey) -> Option<Arc<WidgetDescriptor>> {
		self.index.get(key).cloned()
	}

	/// Returns every builtin, field editors first, then sidebar and editor widgets.
	pub fn all(&self) -> impl Iterator<Item = &Arc<WidgetDescriptor>> {
		self.widgets.iter()
	}

	pub fn len(&self) -> usize {
		self.widgets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.widgets.is_empty()
	}

	/// Ids of the currently offered field editors.
	pub fn field_editor_ids(&self) -> &HashSet<String> {
		&self.field_editor_ids
	}

	/// Ids of retired field editors.
	pub fn deprecated_ids(&self) -> &HashSet<String> {
		&self.deprecated_ids
	}

	/// The baseline sidebar layout used when an entity stores none.
	pub fn default_sidebar(&self) -> Vec<WidgetRef> {
		DEFAULT_SIDEBAR
			.iter()
			.map(|id| WidgetRef::new(WidgetNamespace::SidebarBuiltin, *id))
			.collect()
	}
}

fn builtin(namespace: WidgetNamespace, id: &str, name: &str) -> WidgetDescriptor {
	WidgetDescriptor {
		namespace,
		id: id.to_string(),
		name: name.to_string(),
		field_types: None,
		parameters: Vec::new(),
		installation_parameters: None,
		sidebar: false,
		not_focusable: false,
		is_background: false,
		default_editor: false,
		renderer: WidgetRenderer::Builtin { component: id.to_string() },
	}
}

fn field_editor(id: &str, name: &str, types: &[FieldType], parameters: Vec<ParameterDefinition>) -> WidgetDescriptor {
	let mut parameters = parameters;
	parameters.insert(0, ParameterDefinition::new("helpText"));
	WidgetDescriptor {
		field_types: Some(types.to_vec()),
		parameters,
		..builtin(WidgetNamespace::Builtin, id, name)
	}
}

fn param(id: &str, default: impl Into<Value>) -> ParameterDefinition {
	ParameterDefinition::new(id).with_default(default)
}

fn field_editors() -> Vec<WidgetDescriptor> {
	vec![
		field_editor("singleLine", "Single line", &[Symbol, Text], vec![]),
		field_editor("multipleLine", "Multiple line", &[Text], vec![]),
		field_editor("markdown", "Markdown", &[Text], vec![]),
		field_editor("richTextEditor", "Rich text", &[RichText], vec![]),
		field_editor("slugEditor", "Slug", &[Symbol], vec![ParameterDefinition::new("trackingFieldId")]),
		field_editor("urlEditor", "URL", &[Symbol], vec![]),
		field_editor("dropdown", "Dropdown", &[Symbol, Integer, Number], vec![]),
		field_editor("radio", "Radio", &[Symbol, Integer, Number], vec![]),
		field_editor("numberEditor", "Number", &[Integer, Number], vec![]),
		field_editor("rating", "Rating", &[Integer, Number], vec![param("stars", 5)]),
		field_editor("boolean", "Boolean", &[Boolean], vec![param("trueLabel", "Yes"), param("falseLabel", "No")]),
		field_editor("datePicker", "Date picker", &[Date], vec![param("format", "timeZ"), param("ampm", "24")]),
		field_editor("locationEditor", "Location", &[Location], vec![]),
		field_editor("objectEditor", "JSON editor", &[Object], vec![]),
		field_editor(
			"entryLinkEditor",
			"Entry link",
			&[Entry],
			vec![param("showLinkEntityAction", true), param("showCreateEntityAction", true)],
		),
		field_editor("assetLinkEditor", "Asset card", &[Asset], vec![param("showLinkEntityAction", true), param("showCreateEntityAction", true)]),
		field_editor(
			"entryLinksEditor",
			"Entry links list",
			&[Entries],
			vec![param("bulkEditing", false), param("showLinkEntityAction", true), param("showCreateEntityAction", true)],
		),
		field_editor("assetLinksEditor", "Asset links list", &[Assets], vec![param("showLinkEntityAction", true), param("showCreateEntityAction", true)]),
		field_editor("tagEditor", "Tag", &[Symbols], vec![]),
		field_editor("listInput", "List", &[Symbols], vec![]),
		field_editor("checkbox", "Checkbox", &[Symbols], vec![]),
		field_editor("fileEditor", "File", &[File], vec![]),
	]
}

fn sidebar_widgets() -> Vec<WidgetDescriptor> {
	[
		("publication-widget", "Publish & Status"),
		("releases-widget", "Releases"),
		("content-workflow-tasks-widget", "Tasks"),
		("content-preview-widget", "Preview"),
		("incoming-links-widget", "Links"),
		("translation-widget", "Translation"),
		("versions-widget", "Versions"),
		("users-widget", "Users"),
		("info-panel", "Info"),
	]
	.into_iter()
	.map(|(id, name)| WidgetDescriptor {
		sidebar: true,
		..builtin(WidgetNamespace::SidebarBuiltin, id, name)
	})
	.collect()
}

fn editor_widgets() -> Vec<WidgetDescriptor> {
	vec![
		WidgetDescriptor {
			default_editor: true,
			..builtin(WidgetNamespace::EditorBuiltin, "default-editor", "Editor")
		},
		WidgetDescriptor {
			not_focusable: true,
			..builtin(WidgetNamespace::EditorBuiltin, "reference-tree", "References")
		},
	]
}
