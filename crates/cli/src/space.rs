//! JSON file backed space.
//!
//! A space file holds everything one environment needs:
//!
//! ```json
//! {
//!   "contentTypes": [{ "id": "blogPost", "fields": [{ "id": "title", "type": "Symbol" }] }],
//!   "editorInterfaces": [{ "typeId": "blogPost", "controls": [] }],
//!   "installations": [{ "id": "inst-1", "widgetNamespace": "app", "widgetId": "seo" }],
//!   "widgets": [{ "namespace": "app", "id": "seo", "renderer": { "kind": "hosted", "src": "https://widgets.example/seo" } }]
//! }
//! ```
//!
//! Every successful write rewrites the whole file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use vellum_primitives::{ConfigurationEntity, ContentType, WidgetDescriptor, WidgetKey, WidgetNamespace};
use vellum_reconcile::{EntityStore, StoreError, StoredInterface};
use vellum_registry::{CatalogScope, ProviderError, WidgetProvider};

/// Errors loading a space file.
#[derive(Debug, thiserror::Error)]
pub enum SpaceError {
	#[error("I/O error reading {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },
	#[error("invalid space file {path}: {error}")]
	Json { path: PathBuf, error: serde_json::Error },
}

/// On-disk layout of a space file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpaceFile {
	pub content_types: Vec<ContentType>,
	pub editor_interfaces: Vec<ConfigurationEntity>,
	pub installations: Vec<Installation>,
	pub widgets: Vec<WidgetDescriptor>,
}

/// An installed widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
	pub id: String,
	pub widget_namespace: WidgetNamespace,
	pub widget_id: String,
}

impl SpaceFile {
	fn interface(&self, content_type: &ContentType) -> ConfigurationEntity {
		self.editor_interfaces
			.iter()
			.find(|e| e.type_id == content_type.id)
			.cloned()
			.unwrap_or_else(|| ConfigurationEntity::new(content_type.id.clone()))
	}
}

/// Entity store and widget provider over one space file.
pub struct FileSpace {
	path: PathBuf,
	space: Mutex<SpaceFile>,
}

impl FileSpace {
	pub async fn open(path: impl AsRef<Path>) -> Result<Self, SpaceError> {
		let path = path.as_ref().to_path_buf();
		let content = tokio::fs::read_to_string(&path).await.map_err(|error| SpaceError::Io {
			path: path.clone(),
			error,
		})?;
		let space = serde_json::from_str(&content).map_err(|error| SpaceError::Json { path: path.clone(), error })?;
		tracing::debug!(path = %path.display(), "space file loaded");
		Ok(Self {
			path,
			space: Mutex::new(space),
		})
	}

	/// Identifies the space for catalog caching.
	pub fn scope(&self) -> CatalogScope {
		CatalogScope::new("local", self.path.display().to_string(), "master")
	}

	/// The widget an installation refers to.
	pub async fn installation_widget(&self, installation_id: &str) -> Option<WidgetKey> {
		let space = self.space.lock().await;
		space
			.installations
			.iter()
			.find(|i| i.id == installation_id)
			.map(|i| WidgetKey::new(i.widget_namespace.clone(), i.widget_id.clone()))
	}

	pub async fn snapshot(&self) -> SpaceFile {
		self.space.lock().await.clone()
	}

	async fn persist(&self, space: &SpaceFile) -> Result<(), StoreError> {
		let json = serde_json::to_string_pretty(space).map_err(|e| StoreError::Backend(e.to_string()))?;
		tokio::fs::write(&self.path, json)
			.await
			.map_err(|e| StoreError::Backend(format!("writing {}: {e}", self.path.display())))
	}
}

#[async_trait]
impl EntityStore for FileSpace {
	async fn editor_interfaces(&self) -> Result<Vec<StoredInterface>, StoreError> {
		let space = self.space.lock().await;
		Ok(space
			.content_types
			.iter()
			.map(|ct| StoredInterface::new(ct.clone(), space.interface(ct)))
			.collect())
	}

	async fn update_editor_interface(&self, entity: ConfigurationEntity) -> Result<ConfigurationEntity, StoreError> {
		let mut space = self.space.lock().await;
		if !space.content_types.iter().any(|ct| ct.id == entity.type_id) {
			return Err(StoreError::NotFound(entity.type_id));
		}

		let mut next = space.clone();
		match next.editor_interfaces.iter_mut().find(|e| e.type_id == entity.type_id) {
			Some(stored) => *stored = entity.clone(),
			None => next.editor_interfaces.push(entity.clone()),
		}
		self.persist(&next).await?;
		*space = next;
		Ok(entity)
	}

	async fn delete_installation(&self, installation_id: &str) -> Result<(), StoreError> {
		let mut space = self.space.lock().await;
		let mut next = space.clone();
		let before = next.installations.len();
		next.installations.retain(|i| i.id != installation_id);
		if next.installations.len() == before {
			return Err(StoreError::NotFound(installation_id.to_string()));
		}
		self.persist(&next).await?;
		*space = next;
		Ok(())
	}
}

#[async_trait]
impl WidgetProvider for FileSpace {
	async fn fetch(&self, _scope: &CatalogScope, key: &WidgetKey) -> Result<Option<WidgetDescriptor>, ProviderError> {
		let space = self.space.lock().await;
		Ok(space.widgets.iter().find(|w| w.key() == *key).cloned())
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;
	use vellum_primitives::WidgetRef;

	use super::*;

	fn sample() -> serde_json::Value {
		json!({
			"contentTypes": [
				{"id": "blogPost", "fields": [{"id": "title", "type": "Symbol"}]},
				{"id": "author", "fields": [{"id": "name", "type": "Symbol"}]}
			],
			"editorInterfaces": [
				{"typeId": "blogPost", "controls": [{"fieldId": "title", "widgetNamespace": "builtin", "widgetId": "singleLine"}]}
			],
			"installations": [{"id": "inst-1", "widgetNamespace": "app", "widgetId": "seo"}],
			"widgets": [{"namespace": "app", "id": "seo", "renderer": {"kind": "hosted", "src": "https://widgets.test/seo"}}]
		})
	}

	async fn open_sample() -> (tempfile::TempDir, FileSpace) {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("space.json");
		std::fs::write(&path, sample().to_string()).unwrap();
		let space = FileSpace::open(&path).await.unwrap();
		(dir, space)
	}

	#[tokio::test]
	async fn unconfigured_types_get_empty_entities() {
		let (_dir, space) = open_sample().await;
		let interfaces = space.editor_interfaces().await.unwrap();
		assert_eq!(interfaces.len(), 2);
		assert_eq!(interfaces[0].entity.controls.len(), 1);
		assert_eq!(interfaces[1].entity, ConfigurationEntity::new("author"));
	}

	#[tokio::test]
	async fn writes_are_persisted_to_disk() {
		let (dir, space) = open_sample().await;
		let mut entity = ConfigurationEntity::new("author");
		entity.editor = Some(WidgetKey::app("seo").to_ref());
		space.update_editor_interface(entity.clone()).await.unwrap();

		let reopened = FileSpace::open(dir.path().join("space.json")).await.unwrap();
		let snapshot = reopened.snapshot().await;
		assert_eq!(snapshot.editor_interfaces.len(), 2);
		assert_eq!(snapshot.editor_interfaces[1].editor, Some(WidgetRef::new(WidgetNamespace::App, "seo")));
	}

	#[tokio::test]
	async fn unknown_content_type_is_rejected() {
		let (_dir, space) = open_sample().await;
		let err = space.update_editor_interface(ConfigurationEntity::new("ghost")).await.unwrap_err();
		assert_eq!(err, StoreError::NotFound("ghost".into()));
	}

	#[tokio::test]
	async fn installations_and_widgets_resolve() {
		let (_dir, space) = open_sample().await;
		assert_eq!(space.installation_widget("inst-1").await, Some(WidgetKey::app("seo")));
		assert!(space.fetch(&space.scope(), &WidgetKey::app("seo")).await.unwrap().is_some());
		assert!(space.fetch(&space.scope(), &WidgetKey::app("other")).await.unwrap().is_none());

		space.delete_installation("inst-1").await.unwrap();
		assert_eq!(space.installation_widget("inst-1").await, None);
		assert!(matches!(space.delete_installation("inst-1").await, Err(StoreError::NotFound(_))));
	}
}
