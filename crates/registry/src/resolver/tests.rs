use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use vellum_primitives::{WidgetNamespace, WidgetRenderer};

use super::*;
use crate::provider::WidgetProvider;

#[derive(Default)]
struct StubProvider {
	fetches: AtomicUsize,
}

#[async_trait]
impl WidgetProvider for StubProvider {
	async fn fetch(&self, _scope: &CatalogScope, key: &WidgetKey) -> Result<Option<WidgetDescriptor>, ProviderError> {
		self.fetches.fetch_add(1, Ordering::SeqCst);
		match key.id.as_str() {
			"broken" => Err(ProviderError::Unavailable("timeout".into())),
			"gone" => Ok(None),
			id => Ok(Some(WidgetDescriptor {
				namespace: key.namespace.clone(),
				id: id.to_string(),
				name: id.to_string(),
				field_types: None,
				parameters: Vec::new(),
				installation_parameters: None,
				sidebar: true,
				not_focusable: false,
				is_background: false,
				default_editor: false,
				renderer: WidgetRenderer::Hosted { src: format!("https://apps.test/{id}") },
			})),
		}
	}
}

fn resolver(provider: Arc<StubProvider>) -> CatalogResolver {
	let cache = Arc::new(CatalogCache::new(provider));
	CatalogResolver::new(cache, CatalogScope::new("token", "space", "master"))
}

#[tokio::test]
async fn builtins_resolve_without_provider() {
	let provider = Arc::new(StubProvider::default());
	let resolver = resolver(provider.clone());

	let markdown = resolver.resolve(&WidgetKey::builtin("markdown")).await.unwrap();
	assert_eq!(markdown.map(|d| d.id.clone()), Some("markdown".to_string()));
	assert!(resolver.resolve(&WidgetKey::builtin("nope")).await.unwrap().is_none());
	assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
	assert_eq!(resolver.list_builtins().len(), BUILTINS.len());
}

#[tokio::test]
async fn snapshot_collects_hosted_widgets_and_failures() {
	let provider = Arc::new(StubProvider::default());
	let resolver = resolver(provider.clone());

	let catalog = resolver
		.snapshot([
			WidgetKey::app("good"),
			WidgetKey::app("good"),
			WidgetKey::new(WidgetNamespace::Extension, "gone"),
			WidgetKey::app("broken"),
			WidgetKey::builtin("singleLine"),
		])
		.await;

	assert!(catalog.contains(&WidgetKey::app("good")));
	assert!(catalog.contains(&WidgetKey::builtin("singleLine")));
	assert!(!catalog.contains(&WidgetKey::new(WidgetNamespace::Extension, "gone")));
	assert!(catalog.failed_keys().contains(&WidgetKey::app("broken")));
	assert_eq!(catalog.len(), BUILTINS.len() + 1);
	assert_eq!(provider.fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn evict_forces_refetch() {
	let provider = Arc::new(StubProvider::default());
	let resolver = resolver(provider.clone());
	let key = WidgetKey::app("good");

	resolver.resolve(&key).await.unwrap();
	resolver.resolve(&key).await.unwrap();
	assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);

	assert_eq!(resolver.evict(&key), 1);
	resolver.resolve(&key).await.unwrap();
	assert_eq!(provider.fetches.load(Ordering::SeqCst), 2);
}
