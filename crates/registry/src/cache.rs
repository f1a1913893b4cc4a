//! Per-scope hosted widget cache.
//!
//! One [`WidgetLoader`] per [`CatalogScope`], created lazily. Loaders memoize
//! provider answers per widget key, including "not found". Entries never
//! expire; [`CatalogCache::evict`] drops a key from every loader and is
//! visible to the next lookup.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use vellum_primitives::{WidgetDescriptor, WidgetKey};

use crate::provider::{CatalogScope, ProviderError, WidgetProvider};


/// Memoized entries plus an eviction generation.
///
/// A fetch that started before an eviction must not resurrect the evicted
/// entry, so inserts are dropped when the generation moved in the meantime.
#[derive(Default)]
struct LoaderState {
	entries: HashMap<WidgetKey, Option<Arc<WidgetDescriptor>>>,
	generation: u64,
}

/// Memoizing widget lookups for a single access scope.
pub struct WidgetLoader {
	scope: CatalogScope,
	provider: Arc<dyn WidgetProvider>,
	state: RwLock<LoaderState>,
}

impl WidgetLoader {
	fn new(scope: CatalogScope, provider: Arc<dyn WidgetProvider>) -> Self {
		Self {
			scope,
			provider,
			state: RwLock::new(LoaderState::default()),
		}
	}

	pub fn scope(&self) -> &CatalogScope {
		&self.scope
	}

	/// Returns the descriptor for `key`, fetching it on a miss.
	///
	/// Provider errors are returned and not memoized.
	pub async fn get(&self, key: &WidgetKey) -> Result<Option<Arc<WidgetDescriptor>>, ProviderError> {
		let (cached, generation) = {
			let state = self.state.read();
			(state.entries.get(key).cloned(), state.generation)
		};
		if let Some(hit) = cached {
			tracing::trace!(widget = %key, "catalog.cache.hit");
			return Ok(hit);
		}

		tracing::debug!(widget = %key, space = %self.scope.space_id, env = %self.scope.environment, "catalog.cache.miss");
		let fetched = self.provider.fetch(&self.scope, key).await?.map(Arc::new);

		let mut state = self.state.write();
		if state.generation != generation {
			return Ok(fetched);
		}
		Ok(state.entries.entry(key.clone()).or_insert(fetched).clone())
	}

	/// Drops the memoized entry for `key`. Returns whether one existed.
	pub fn evict(&self, key: &WidgetKey) -> bool {
		let mut state = self.state.write();
		state.generation = state.generation.wrapping_add(1);
		state.entries.remove(key).is_some()
	}

	/// Number of memoized keys.
	pub fn len(&self) -> usize {
		self.state.read().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Process-wide cache of widget loaders keyed by access scope.
///
/// Constructed once at startup and shared by every resolver.
pub struct CatalogCache {
	provider: Arc<dyn WidgetProvider>,
	loaders: RwLock<HashMap<CatalogScope, Arc<WidgetLoader>>>,
}

impl CatalogCache {
	pub fn new(provider: Arc<dyn WidgetProvider>) -> Self {
		Self {
			provider,
			loaders: RwLock::new(HashMap::new()),
		}
	}

	/// Returns the loader for `scope`, creating it on first use.
	pub fn loader(&self, scope: &CatalogScope) -> Arc<WidgetLoader> {
		if let Some(loader) = self.loaders.read().get(scope) {
			return Arc::clone(loader);
		}
		let mut loaders = self.loaders.write();
		Arc::clone(
			loaders
				.entry(scope.clone())
				.or_insert_with(|| Arc::new(WidgetLoader::new(scope.clone(), Arc::clone(&self.provider)))),
		)
	}

	/// Removes `key` from every loader. Returns how many loaders held it.
	pub fn evict(&self, key: &WidgetKey) -> usize {
		let loaders: Vec<Arc<WidgetLoader>> = self.loaders.read().values().cloned().collect();
		let evicted = loaders.iter().filter(|loader| loader.evict(key)).count();
		tracing::debug!(widget = %key, loaders = loaders.len(), evicted, "catalog.cache.evict");
		evicted
	}

	/// Number of scopes with a live loader.
	pub fn scope_count(&self) -> usize {
		self.loaders.read().len()
	}
}
