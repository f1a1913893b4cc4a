//! Per-control renderables.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use vellum_primitives::{Control, Field, Settings, WidgetDescriptor, WidgetKey, WidgetNamespace};
use vellum_registry::WidgetCatalog;

use crate::params::merge_defaults;


/// Why a slot cannot be rendered with its configured widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
	/// The widget is not in the catalog.
	Missing,
	/// The widget does not support the field's type.
	Incompatible,
	/// The caller reported a server-side failure resolving the widget.
	InternalError,
}

/// Instance and installation parameters with declared defaults filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Parameters {
	pub instance: Settings,
	pub installation: Settings,
}

/// Everything the UI layer needs to render one slot.
///
/// Built once and shared behind [`Arc`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Renderable {
	/// Set for form controls, absent for sidebar and editor slots.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field_id: Option<String>,
	pub widget_namespace: WidgetNamespace,
	pub widget_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Arc<Field>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub descriptor: Option<Arc<WidgetDescriptor>>,
	/// Explicitly configured settings. Absent when `problem` is set.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub settings: Option<Settings>,
	/// Absent when `problem` is set.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parameters: Option<Parameters>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub problem: Option<Problem>,
	pub is_focusable: bool,
	pub is_background: bool,
	pub sidebar: bool,
}

impl Renderable {
	pub fn key(&self) -> WidgetKey {
		WidgetKey::new(self.widget_namespace.clone(), self.widget_id.clone())
	}

	pub fn has_problem(&self) -> bool {
		self.problem.is_some()
	}
}

/// Caller-supplied resolution context.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
	/// Widgets whose lookup failed server-side. A missing widget listed here
	/// is reported as [`Problem::InternalError`] instead of [`Problem::Missing`].
	pub internal_errors: HashSet<WidgetKey>,
}

impl RenderOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_internal_error(mut self, key: WidgetKey) -> Self {
		self.internal_errors.insert(key);
		self
	}

	/// Treats every provider failure recorded in `catalog` as an internal error.
	pub fn from_catalog(catalog: &WidgetCatalog) -> Self {
		Self {
			internal_errors: catalog.failed_keys().clone(),
		}
	}
}

/// Form controls split by placement. `all` keeps the input order and shares
/// instances with `form` and `sidebar`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Renderables {
	pub form: Vec<Arc<Renderable>>,
	pub sidebar: Vec<Arc<Renderable>>,
	pub all: Vec<Arc<Renderable>>,
}

/// Resolves one synchronized control.
///
/// Returns `None` for controls without an attached field or without a
/// complete widget reference; those are not rendered at all.
pub fn build_renderable(control: &Control, catalog: &WidgetCatalog, options: &RenderOptions) -> Option<Renderable> {
	let field = control.field.as_ref()?;
	let key = control.key()?;
	let mut renderable = resolve(key, control.settings.as_ref(), Some(field), catalog, options);
	renderable.field_id = Some(control.field_id.clone());
	Some(renderable)
}

/// Resolves a list of controls and partitions the result.
pub fn build_renderables(controls: &[Control], catalog: &WidgetCatalog, options: &RenderOptions) -> Renderables {
	let mut renderables = Renderables::default();
	for renderable in controls.iter().filter_map(|c| build_renderable(c, catalog, options)) {
		let renderable = Arc::new(renderable);
		if renderable.sidebar {
			renderables.sidebar.push(Arc::clone(&renderable));
		} else {
			renderables.form.push(Arc::clone(&renderable));
		}
		renderables.all.push(renderable);
	}
	renderables
}

/// Looks `key` up and builds its renderable.
///
/// The field compatibility check only runs when `field` is given.
pub(crate) fn resolve(key: WidgetKey, settings: Option<&Settings>, field: Option<&Arc<Field>>, catalog: &WidgetCatalog, options: &RenderOptions) -> Renderable {
	let descriptor = catalog.get(&key).cloned();
	let problem = match (&descriptor, field) {
		(None, _) if options.internal_errors.contains(&key) => Some(Problem::InternalError),
		(None, _) => Some(Problem::Missing),
		(Some(descriptor), Some(field)) if !field.normalized_type().is_some_and(|t| descriptor.supports(t)) => Some(Problem::Incompatible),
		(Some(_), _) => None,
	};
	if let Some(problem) = problem {
		tracing::debug!(widget = %key, ?problem, "widget cannot be rendered");
	}

	let parameters = match (&descriptor, problem) {
		(Some(descriptor), None) => Some(Parameters {
			instance: merge_defaults(settings, &descriptor.parameters),
			installation: descriptor
				.installation_parameters
				.as_ref()
				.map(|p| merge_defaults(Some(&p.values), &p.definitions))
				.unwrap_or_default(),
		}),
		_ => None,
	};

	Renderable {
		field_id: None,
		widget_namespace: key.namespace,
		widget_id: key.id,
		field: field.cloned(),
		is_focusable: descriptor.as_ref().is_none_or(|d| !d.not_focusable),
		is_background: descriptor.as_ref().is_some_and(|d| d.is_background),
		sidebar: descriptor.as_ref().is_some_and(|d| d.sidebar),
		settings: if problem.is_none() { settings.cloned() } else { None },
		parameters,
		problem,
		descriptor,
	}
}
