//! Best-effort batch reconciliation of editor configuration.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use vellum_controls::ControlSynchronizer;
use vellum_primitives::{ConfigurationEntity, TargetState, WidgetKey, WidgetRef};
use vellum_registry::BUILTINS;

use crate::error::{ReconcileError, Result};
use crate::store::{EntityStore, StoredInterface};
use crate::telemetry::{TelemetrySink, UPDATE_DISCARDED};
use crate::transform::{apply_type_target, strip_references};
use crate::validate::parse_target_state;

#[cfg(test)]
mod tests;

/// Applies and removes an installable widget's editor configuration across
/// every content type of one space environment.
///
/// Runs are not serialized: two concurrent runs against the same store race
/// and the last write per content type wins.
pub struct Reconciler {
	store: Arc<dyn EntityStore>,
	telemetry: Arc<dyn TelemetrySink>,
	synchronizer: ControlSynchronizer,
	baseline_sidebar: Vec<WidgetRef>,
}

impl Reconciler {
	/// A reconciler using the builtin migration table and default sidebar.
	pub fn new(store: Arc<dyn EntityStore>, telemetry: Arc<dyn TelemetrySink>) -> Self {
		Self {
			store,
			telemetry,
			synchronizer: ControlSynchronizer::new(),
			baseline_sidebar: BUILTINS.default_sidebar(),
		}
	}

	pub fn with_synchronizer(mut self, synchronizer: ControlSynchronizer) -> Self {
		self.synchronizer = synchronizer;
		self
	}

	/// Overrides the sidebar used to seed content types without a stored one.
	pub fn with_baseline_sidebar(mut self, baseline: Vec<WidgetRef>) -> Self {
		self.baseline_sidebar = baseline;
		self
	}

	/// Makes the stored configuration reflect `target` for `acting`.
	///
	/// The document is validated before any I/O. Returns the entities that
	/// were written; write failures are absorbed and counted.
	#[tracing::instrument(skip_all, fields(widget = %acting))]
	pub async fn apply_target_state(&self, target: &Value, acting: &WidgetKey) -> Result<Vec<ConfigurationEntity>> {
		let state = parse_target_state(target)?;
		self.reconcile(acting, Some(&state)).await
	}

	/// Removes every reference to `acting` from every content type.
	#[tracing::instrument(skip_all, fields(widget = %acting))]
	pub async fn remove_all_references(&self, acting: &WidgetKey) -> Result<Vec<ConfigurationEntity>> {
		self.reconcile(acting, None).await
	}

	/// Removes every reference to `acting`, then deletes its installation.
	#[tracing::instrument(skip(self, acting), fields(widget = %acting))]
	pub async fn uninstall(&self, installation_id: &str, acting: &WidgetKey) -> Result<Vec<ConfigurationEntity>> {
		let written = self.reconcile(acting, None).await?;
		self.store
			.delete_installation(installation_id)
			.await
			.map_err(|source| ReconcileError::Uninstall {
				id: installation_id.to_string(),
				source,
			})?;
		tracing::info!(installation = installation_id, "installation deleted");
		Ok(written)
	}

	async fn reconcile(&self, acting: &WidgetKey, state: Option<&TargetState>) -> Result<Vec<ConfigurationEntity>> {
		let interfaces = self.store.editor_interfaces().await.map_err(ReconcileError::Fetch)?;
		let baseline = self.resolve_baseline(state).await;

		let changed: Vec<ConfigurationEntity> = interfaces
			.into_iter()
			.filter_map(|stored| self.next_entity(stored, acting, state, &baseline))
			.collect();

		if changed.is_empty() {
			tracing::debug!("no content type changed");
			return Ok(Vec::new());
		}

		let attempted = changed.len();
		let results = join_all(changed.into_iter().map(|entity| async move {
			let type_id = entity.type_id.clone();
			(type_id, self.store.update_editor_interface(entity).await)
		}))
		.await;

		let mut written = Vec::with_capacity(attempted);
		for (type_id, result) in results {
			match result {
				Ok(entity) => written.push(entity),
				Err(error) => {
					tracing::warn!(type_id = %type_id, %error, "discarding failed editor interface update");
					self.telemetry.increment(UPDATE_DISCARDED, &[("type_id", type_id.as_str())]);
				}
			}
		}

		tracing::info!(attempted, written = written.len(), "reconciled editor interfaces");
		Ok(written)
	}

	/// Computes the desired entity for one content type, or `None` when it
	/// matches the synchronized original.
	fn next_entity(&self, stored: StoredInterface, acting: &WidgetKey, state: Option<&TargetState>, baseline: &[WidgetRef]) -> Option<ConfigurationEntity> {
		let StoredInterface { content_type, mut entity } = stored;
		entity.controls = self.synchronizer.synchronize(&content_type.fields, &entity.controls);
		let original = entity;

		let mut next = original.clone();
		strip_references(&mut next, acting);
		if let Some(target) = state.and_then(|s| s.get(&content_type.id)) {
			apply_type_target(&mut next, target, acting, baseline);
		}

		if next == original {
			tracing::debug!(type_id = %content_type.id, "unchanged");
			return None;
		}
		tracing::debug!(type_id = %content_type.id, "scheduling update");
		Some(next)
	}

	/// The sidebar used to seed content types without a stored one.
	///
	/// Only consulted when some type targets the sidebar.
	async fn resolve_baseline(&self, state: Option<&TargetState>) -> Vec<WidgetRef> {
		let needed = state.is_some_and(|s| s.types.values().any(|t| t.sidebar.is_some()));
		if !needed {
			return Vec::new();
		}
		match self.store.baseline_sidebar().await {
			Ok(Some(baseline)) => baseline,
			Ok(None) => self.baseline_sidebar.clone(),
			Err(error) => {
				tracing::warn!(%error, "failed to fetch baseline sidebar; using configured default");
				self.baseline_sidebar.clone()
			}
		}
	}
}
