//! Widget resolution for one access scope.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::future::join_all;
use vellum_primitives::{WidgetDescriptor, WidgetKey};

use crate::builtins::BUILTINS;
use crate::cache::CatalogCache;
use crate::catalog::WidgetCatalog;
use crate::provider::{CatalogScope, ProviderError};

#[cfg(test)]
mod tests;

/// Resolves widget keys to descriptors: builtins from the static registry,
/// hosted widgets through the shared [`CatalogCache`].
#[derive(Clone)]
pub struct CatalogResolver {
	cache: Arc<CatalogCache>,
	scope: CatalogScope,
}

impl CatalogResolver {
	pub fn new(cache: Arc<CatalogCache>, scope: CatalogScope) -> Self {
		Self { cache, scope }
	}

	pub fn scope(&self) -> &CatalogScope {
		&self.scope
	}

	/// Resolves one widget. Builtin namespaces never touch the network.
	pub async fn resolve(&self, key: &WidgetKey) -> Result<Option<Arc<WidgetDescriptor>>, ProviderError> {
		if !key.namespace.is_hosted() {
			return Ok(BUILTINS.get(key));
		}
		self.cache.loader(&self.scope).get(key).await
	}

	/// Every builtin descriptor.
	pub fn list_builtins(&self) -> Vec<Arc<WidgetDescriptor>> {
		BUILTINS.all().cloned().collect()
	}

	/// Builds a synchronous catalog holding every builtin plus the hosted
	/// widgets among `keys`.
	///
	/// Hosted lookups run concurrently. A failing lookup is logged and
	/// recorded in [`WidgetCatalog::failed_keys`]; it does not fail the
	/// snapshot.
	pub async fn snapshot(&self, keys: impl IntoIterator<Item = WidgetKey>) -> WidgetCatalog {
		let hosted: BTreeSet<WidgetKey> = keys.into_iter().filter(|key| key.namespace.is_hosted()).collect();
		let loader = self.cache.loader(&self.scope);

		let lookups = hosted.into_iter().map(|key| {
			let loader = Arc::clone(&loader);
			async move {
				let result = loader.get(&key).await;
				(key, result)
			}
		});

		let mut catalog = WidgetCatalog::with_builtins();
		for (key, result) in join_all(lookups).await {
			match result {
				Ok(Some(descriptor)) => catalog.insert_shared(descriptor),
				Ok(None) => tracing::debug!(widget = %key, "hosted widget not found"),
				Err(error) => {
					tracing::warn!(widget = %key, %error, "hosted widget lookup failed");
					catalog.mark_failed(key);
				}
			}
		}
		catalog
	}

	/// Drops `key` from every cached loader, across all scopes.
	pub fn evict(&self, key: &WidgetKey) -> usize {
		self.cache.evict(key)
	}
}
