//! Pure entity transformations used by the reconciler.
//!
//! Both functions operate on an entity whose controls have already been
//! synchronized against the content type's fields.

use vellum_controls::default_control;
use vellum_primitives::{Control, ConfigurationEntity, EditorTarget, Settings, SidebarTarget, TypeTarget, WidgetKey, WidgetRef};


/// Removes every trace of `acting` from `entity`.
///
/// Controls pointing at the widget fall back to their field's default editor,
/// matching sidebar entries and editor slots are dropped, and `editor` is
/// cleared. Everything else is left as is.
pub fn strip_references(entity: &mut ConfigurationEntity, acting: &WidgetKey) {
	for control in entity.controls.iter_mut().filter(|c| c.references(acting)) {
		*control = match &control.field {
			Some(field) => default_control(field),
			None => Control::unassigned(control.field_id.clone()),
		};
	}

	if let Some(sidebar) = entity.sidebar.as_mut() {
		sidebar.retain(|w| !w.references(acting));
	}
	if let Some(editors) = entity.editors.as_mut() {
		editors.retain(|w| !w.references(acting));
	}
	if entity.editor.as_ref().is_some_and(|w| w.references(acting)) {
		entity.editor = None;
	}
}

/// Applies one content type's target onto a stripped entity.
///
/// `baseline` seeds the sidebar when the entity has none stored.
pub fn apply_type_target(entity: &mut ConfigurationEntity, target: &TypeTarget, acting: &WidgetKey, baseline: &[WidgetRef]) {
	for control_target in target.controls.iter().flatten() {
		let Some(control) = entity.controls.iter_mut().find(|c| matches_field(c, &control_target.field_id)) else {
			tracing::debug!(
				type_id = %entity.type_id,
				field = %control_target.field_id,
				"target control names an unknown field; skipping",
			);
			continue;
		};
		control.widget_namespace = Some(acting.namespace.clone());
		control.widget_id = Some(acting.id.clone());
		control.settings = control_target.settings.clone();
	}

	if let Some(sidebar_target) = &target.sidebar {
		let sidebar = entity.sidebar.get_or_insert_with(|| {
			baseline.iter().filter(|w| !w.references(acting)).cloned().collect()
		});
		match sidebar_target {
			SidebarTarget::Append => sidebar.push(acting.to_ref()),
			SidebarTarget::Placed { position, settings } => {
				let widget = widget_ref(acting, settings.as_ref());
				match position {
					Some(position) => sidebar.insert((*position).min(sidebar.len()), widget),
					None => sidebar.push(widget),
				}
			}
		}
	}

	if let Some(editor_target) = &target.editor {
		let widget = match editor_target {
			EditorTarget::Enabled => acting.to_ref(),
			EditorTarget::Configured { settings } => widget_ref(acting, settings.as_ref()),
		};
		if let Some(editors) = entity.editors.as_mut() {
			editors.push(widget.clone());
		}
		entity.editor = Some(widget);
	}
}

fn matches_field(control: &Control, field_id: &str) -> bool {
	control.field_id == field_id || control.field.as_ref().is_some_and(|f| f.id == field_id)
}

fn widget_ref(acting: &WidgetKey, settings: Option<&Settings>) -> WidgetRef {
	match settings {
		Some(settings) => acting.to_ref().with_settings(settings.clone()),
		None => acting.to_ref(),
	}
}
