//! Sidebar and entry editor slot resolution.
//!
//! Slots are plain widget references with no field attached, so they resolve
//! like controls minus the field compatibility check.

use std::sync::Arc;

use vellum_primitives::{ConfigurationEntity, WidgetRef};
use vellum_registry::WidgetCatalog;

use crate::renderable::{RenderOptions, Renderable, resolve};

/// Resolves the sidebar of one entity.
///
/// `baseline` stands in when nothing is stored. Disabled entries are skipped.
pub fn build_sidebar_renderables(sidebar: Option<&[WidgetRef]>, baseline: &[WidgetRef], catalog: &WidgetCatalog, options: &RenderOptions) -> Vec<Arc<Renderable>> {
	sidebar
		.unwrap_or(baseline)
		.iter()
		.filter(|w| !w.is_disabled())
		.map(|w| Arc::new(resolve_ref(w, catalog, options)))
		.collect()
}

/// Resolves the entry editor slots of one entity.
///
/// Starts from the configured slots, drops disabled ones, then appends every
/// catalog default editor that is neither configured nor disabled.
pub fn build_editor_renderables(entity: &ConfigurationEntity, catalog: &WidgetCatalog, options: &RenderOptions) -> Vec<Arc<Renderable>> {
	let slots = entity.editor_slots();
	let defaults: Vec<WidgetRef> = catalog
		.default_editors()
		.map(|d| d.key())
		.filter(|key| !slots.iter().any(|slot| slot.references(key)))
		.map(|key| key.to_ref())
		.collect();

	slots
		.iter()
		.filter(|w| !w.is_disabled())
		.chain(defaults.iter())
		.map(|w| Arc::new(resolve_ref(w, catalog, options)))
		.collect()
}

fn resolve_ref(widget: &WidgetRef, catalog: &WidgetCatalog, options: &RenderOptions) -> Renderable {
	resolve(widget.key(), widget.settings.as_ref(), None, catalog, options)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use vellum_primitives::{WidgetKey, WidgetNamespace};

	use super::*;
	use crate::Problem;

	fn keys(renderables: &[Arc<Renderable>]) -> Vec<WidgetKey> {
		renderables.iter().map(|r| r.key()).collect()
	}

	#[test]
	fn sidebar_falls_back_to_baseline() {
		let catalog = WidgetCatalog::with_builtins();
		let baseline = vec![WidgetRef::new(WidgetNamespace::SidebarBuiltin, "versions-widget")];

		let rendered = build_sidebar_renderables(None, &baseline, &catalog, &RenderOptions::new());
		assert_eq!(keys(&rendered), vec![baseline[0].key()]);
		assert!(rendered[0].sidebar);
		assert!(rendered[0].field.is_none());

		let stored = vec![WidgetRef::new(WidgetNamespace::SidebarBuiltin, "users-widget")];
		let rendered = build_sidebar_renderables(Some(stored.as_slice()), &baseline, &catalog, &RenderOptions::new());
		assert_eq!(keys(&rendered), vec![stored[0].key()]);
	}

	#[test]
	fn sidebar_reports_missing_without_compatibility_check() {
		let catalog = WidgetCatalog::with_builtins();
		let stored = vec![
			WidgetKey::app("gone").to_ref(),
			WidgetRef::new(WidgetNamespace::SidebarBuiltin, "info-panel"),
		];
		let rendered = build_sidebar_renderables(Some(stored.as_slice()), &[], &catalog, &RenderOptions::new());
		assert_eq!(rendered[0].problem, Some(Problem::Missing));
		assert_eq!(rendered[1].problem, None);
	}

	#[test]
	fn default_editors_are_appended() {
		let catalog = WidgetCatalog::with_builtins();
		let mut entity = ConfigurationEntity::new("ct");
		entity.editors = Some(vec![WidgetRef::new(WidgetNamespace::EditorBuiltin, "reference-tree")]);

		let rendered = build_editor_renderables(&entity, &catalog, &RenderOptions::new());
		assert_eq!(
			keys(&rendered),
			vec![
				WidgetKey::new(WidgetNamespace::EditorBuiltin, "reference-tree"),
				WidgetKey::new(WidgetNamespace::EditorBuiltin, "default-editor"),
			]
		);
		assert!(!rendered[0].is_focusable);
	}

	#[test]
	fn disabled_default_editor_is_not_appended() {
		let catalog = WidgetCatalog::with_builtins();
		let mut disabled = WidgetRef::new(WidgetNamespace::EditorBuiltin, "default-editor");
		disabled.disabled = Some(true);
		let mut entity = ConfigurationEntity::new("ct");
		entity.editors = Some(vec![disabled, WidgetKey::app("w").to_ref()]);

		let rendered = build_editor_renderables(&entity, &catalog, &RenderOptions::new());
		assert_eq!(keys(&rendered), vec![WidgetKey::app("w")]);
		assert_eq!(rendered[0].problem, Some(Problem::Missing));
	}

	#[test]
	fn single_editor_slot_is_used_without_editor_list() {
		let catalog = WidgetCatalog::with_builtins();
		let mut entity = ConfigurationEntity::new("ct");
		entity.editor = Some(WidgetKey::app("w").to_ref());

		let options = RenderOptions::new().with_internal_error(WidgetKey::app("w"));
		let rendered = build_editor_renderables(&entity, &catalog, &options);
		assert_eq!(rendered.len(), 2);
		assert_eq!(rendered[0].problem, Some(Problem::InternalError));
		assert_eq!(rendered[1].key(), WidgetKey::new(WidgetNamespace::EditorBuiltin, "default-editor"));
	}
}
