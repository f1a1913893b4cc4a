//! Namespace inference for controls stored without one.

use std::collections::HashSet;

use vellum_primitives::WidgetNamespace;

/// Infers the namespace of a control that only carries a widget id.
///
/// Ids of current or retired builtin field editors are `builtin`; anything
/// else predates apps and is treated as a legacy `extension`.
pub fn infer_namespace(widget_id: &str, current: &HashSet<String>, deprecated: &HashSet<String>) -> WidgetNamespace {
	if current.contains(widget_id) || deprecated.contains(widget_id) {
		WidgetNamespace::Builtin
	} else {
		WidgetNamespace::Extension
	}
}
