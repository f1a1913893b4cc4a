//! Synchronous widget lookup table.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use vellum_primitives::{WidgetDescriptor, WidgetKey};

use crate::builtins::BUILTINS;

/// A read-only snapshot of resolved widget descriptors.
///
/// Built by [`CatalogResolver::snapshot`] (or by hand in tests) and consumed
/// by the renderable resolver, which never performs I/O itself.
///
/// [`CatalogResolver::snapshot`]: crate::CatalogResolver::snapshot
#[derive(Debug, Clone, Default)]
pub struct WidgetCatalog {
	widgets: HashMap<WidgetKey, Arc<WidgetDescriptor>>,
	order: Vec<WidgetKey>,
	failed: HashSet<WidgetKey>,
}

impl WidgetCatalog {
	/// An empty catalog.
	pub fn new() -> Self {
		Self::default()
	}

	/// A catalog holding every builtin widget.
	pub fn with_builtins() -> Self {
		let mut catalog = Self::new();
		for widget in BUILTINS.all() {
			catalog.insert_shared(Arc::clone(widget));
		}
		catalog
	}

	pub fn insert(&mut self, descriptor: WidgetDescriptor) {
		self.insert_shared(Arc::new(descriptor));
	}

	pub fn insert_shared(&mut self, descriptor: Arc<WidgetDescriptor>) {
		let key = descriptor.key();
		if self.widgets.insert(key.clone(), descriptor).is_none() {
			self.order.push(key);
		}
	}

	pub fn get(&self, key: &WidgetKey) -> Option<&Arc<WidgetDescriptor>> {
		self.widgets.get(key)
	}

	pub fn contains(&self, key: &WidgetKey) -> bool {
		self.widgets.contains_key(key)
	}

	/// Descriptors in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<WidgetDescriptor>> {
		self.order.iter().filter_map(|key| self.widgets.get(key))
	}

	/// Editor widgets appended to editor slot lists by default.
	pub fn default_editors(&self) -> impl Iterator<Item = &Arc<WidgetDescriptor>> {
		self.iter().filter(|w| w.default_editor)
	}

	pub fn len(&self) -> usize {
		self.widgets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.widgets.is_empty()
	}

	/// Records that resolving `key` failed on the provider side.
	pub fn mark_failed(&mut self, key: WidgetKey) {
		self.failed.insert(key);
	}

	/// Keys whose resolution failed while building this snapshot.
	pub fn failed_keys(&self) -> &HashSet<WidgetKey> {
		&self.failed
	}
}
