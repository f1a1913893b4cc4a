//! Entity store collaborator.

use async_trait::async_trait;
use vellum_primitives::{ConfigurationEntity, ContentType, WidgetRef};

use crate::error::StoreError;

/// One content type together with its stored editor configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredInterface {
	pub content_type: ContentType,
	/// An empty entity when the content type has never been configured.
	pub entity: ConfigurationEntity,
}

impl StoredInterface {
	pub fn new(content_type: ContentType, entity: ConfigurationEntity) -> Self {
		Self { content_type, entity }
	}

	/// A content type with no stored configuration.
	pub fn unconfigured(content_type: ContentType) -> Self {
		let entity = ConfigurationEntity::new(content_type.id.clone());
		Self { content_type, entity }
	}
}

/// Persistence for editor configuration in one space environment.
///
/// Implementations own transport, retries and timeouts. The reconciler only
/// calls these methods and never assumes writes are ordered.
#[async_trait]
pub trait EntityStore: Send + Sync {
	/// Loads the editor configuration of every content type.
	async fn editor_interfaces(&self) -> Result<Vec<StoredInterface>, StoreError>;

	/// Persists one entity and returns the stored result.
	async fn update_editor_interface(&self, entity: ConfigurationEntity) -> Result<ConfigurationEntity, StoreError>;

	/// Deletes a widget installation.
	async fn delete_installation(&self, installation_id: &str) -> Result<(), StoreError>;

	/// Space-level default sidebar, if the store defines one.
	///
	/// `Ok(None)` lets the reconciler fall back to its configured baseline.
	async fn baseline_sidebar(&self) -> Result<Option<Vec<WidgetRef>>, StoreError> {
		Ok(None)
	}
}
