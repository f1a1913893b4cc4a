//! Hosted widget provider collaborator.

use async_trait::async_trait;
use vellum_primitives::{WidgetDescriptor, WidgetKey};

/// Access scope a hosted widget lookup runs under.
///
/// The catalog cache keeps one loader per scope, so two tokens for the same
/// space never share results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogScope {
	pub access_token: String,
	pub space_id: String,
	/// Environment id or alias.
	pub environment: String,
}

impl CatalogScope {
	pub fn new(access_token: impl Into<String>, space_id: impl Into<String>, environment: impl Into<String>) -> Self {
		Self {
			access_token: access_token.into(),
			space_id: space_id.into(),
			environment: environment.into(),
		}
	}
}

/// Errors surfaced by a [`WidgetProvider`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
	/// The provider could not be reached or answered with a server error.
	#[error("widget provider unavailable: {0}")]
	Unavailable(String),
	/// The provider answered with a definition that could not be read.
	#[error("malformed definition for widget {key}: {reason}")]
	Malformed { key: WidgetKey, reason: String },
}

/// Resolves hosted (app and extension) widget descriptors.
///
/// Implementations own transport, retry and timeout policy. `Ok(None)` means
/// the widget does not exist in the scope.
#[async_trait]
pub trait WidgetProvider: Send + Sync {
	async fn fetch(&self, scope: &CatalogScope, key: &WidgetKey) -> Result<Option<WidgetDescriptor>, ProviderError>;
}
