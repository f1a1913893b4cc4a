use std::collections::HashSet;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;
use vellum_primitives::{ContentType, Control, Field, WidgetNamespace};

use super::*;
use crate::error::StoreError;
use crate::validate::ValidationError;

#[derive(Default)]
struct MockStore {
	interfaces: Vec<StoredInterface>,
	fail_fetch: bool,
	fail_writes: HashSet<String>,
	fail_delete: bool,
	baseline: Option<std::result::Result<Vec<WidgetRef>, StoreError>>,
	fetches: Mutex<usize>,
	writes: Mutex<Vec<ConfigurationEntity>>,
	deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl EntityStore for MockStore {
	async fn editor_interfaces(&self) -> std::result::Result<Vec<StoredInterface>, StoreError> {
		*self.fetches.lock() += 1;
		if self.fail_fetch {
			return Err(StoreError::Backend("connection reset".into()));
		}
		Ok(self.interfaces.clone())
	}

	async fn update_editor_interface(&self, entity: ConfigurationEntity) -> std::result::Result<ConfigurationEntity, StoreError> {
		if self.fail_writes.contains(&entity.type_id) {
			return Err(StoreError::Conflict(entity.type_id));
		}
		self.writes.lock().push(entity.clone());
		Ok(entity)
	}

	async fn delete_installation(&self, installation_id: &str) -> std::result::Result<(), StoreError> {
		if self.fail_delete {
			return Err(StoreError::NotFound(installation_id.to_string()));
		}
		self.deleted.lock().push(installation_id.to_string());
		Ok(())
	}

	async fn baseline_sidebar(&self) -> std::result::Result<Option<Vec<WidgetRef>>, StoreError> {
		match &self.baseline {
			None => Ok(None),
			Some(result) => result.clone().map(Some),
		}
	}
}

#[derive(Default)]
struct RecordingTelemetry {
	events: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl TelemetrySink for RecordingTelemetry {
	fn increment(&self, counter: &'static str, tags: &[(&'static str, &str)]) {
		let tags = tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		self.events.lock().push((counter.to_string(), tags));
	}
}

fn acting() -> WidgetKey {
	WidgetKey::app("w")
}

fn unconfigured(id: &str) -> StoredInterface {
	StoredInterface::unconfigured(ContentType::new(id, vec![Field::new("title", "Symbol")]))
}

fn reconciler(store: &Arc<MockStore>, telemetry: &Arc<RecordingTelemetry>) -> Reconciler {
	Reconciler::new(store.clone(), telemetry.clone())
}

#[tokio::test]
async fn invalid_target_state_performs_no_io() {
	let store = Arc::new(MockStore {
		interfaces: vec![unconfigured("ct")],
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());

	let err = reconciler(&store, &telemetry)
		.apply_target_state(&json!({"EditorInterface": {"ct": {"controls": [{}]}}}), &acting())
		.await
		.unwrap_err();

	assert!(matches!(err, ReconcileError::Validation(ValidationError { ref path, .. }) if path == "EditorInterface/ct/controls/0/fieldId"));
	assert_eq!(*store.fetches.lock(), 0);
	assert!(store.writes.lock().is_empty());
}

#[tokio::test]
async fn fetch_failure_is_fatal() {
	let store = Arc::new(MockStore {
		fail_fetch: true,
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());

	let err = reconciler(&store, &telemetry).remove_all_references(&acting()).await.unwrap_err();
	assert!(matches!(err, ReconcileError::Fetch(StoreError::Backend(_))));
	assert!(store.writes.lock().is_empty());
}

#[tokio::test]
async fn failed_writes_are_counted_not_raised() {
	let store = Arc::new(MockStore {
		interfaces: vec![unconfigured("a"), unconfigured("b"), unconfigured("c")],
		fail_writes: HashSet::from(["b".to_string()]),
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());
	let target = json!({"EditorInterface": {"a": {"editor": true}, "b": {"editor": true}, "c": {"editor": true}}});

	let written = reconciler(&store, &telemetry).apply_target_state(&target, &acting()).await.unwrap();

	let mut ids: Vec<_> = written.iter().map(|e| e.type_id.as_str()).collect();
	ids.sort_unstable();
	assert_eq!(ids, ["a", "c"]);
	assert_eq!(store.writes.lock().len(), 2);
	assert_eq!(
		*telemetry.events.lock(),
		vec![(UPDATE_DISCARDED.to_string(), vec![("type_id".to_string(), "b".to_string())])]
	);
}

#[tokio::test]
async fn store_baseline_takes_precedence() {
	let store_baseline = vec![WidgetRef::new(WidgetNamespace::SidebarBuiltin, "from-store")];
	let store = Arc::new(MockStore {
		interfaces: vec![unconfigured("ct")],
		baseline: Some(Ok(store_baseline.clone())),
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());

	let written = reconciler(&store, &telemetry)
		.with_baseline_sidebar(vec![WidgetRef::new(WidgetNamespace::SidebarBuiltin, "configured")])
		.apply_target_state(&json!({"EditorInterface": {"ct": {"sidebar": true}}}), &acting())
		.await
		.unwrap();

	assert_eq!(written[0].sidebar, Some(vec![store_baseline[0].clone(), acting().to_ref()]));
}

#[tokio::test]
async fn baseline_fetch_failure_falls_back_to_configured() {
	let configured = vec![WidgetRef::new(WidgetNamespace::SidebarBuiltin, "configured")];
	let store = Arc::new(MockStore {
		interfaces: vec![unconfigured("ct")],
		baseline: Some(Err(StoreError::Backend("timeout".into()))),
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());

	let written = reconciler(&store, &telemetry)
		.with_baseline_sidebar(configured.clone())
		.apply_target_state(&json!({"EditorInterface": {"ct": {"sidebar": {"position": 0}}}}), &acting())
		.await
		.unwrap();

	assert_eq!(written[0].sidebar, Some(vec![acting().to_ref(), configured[0].clone()]));
}

#[tokio::test]
async fn synchronization_alone_does_not_trigger_writes() {
	let mut stale = ConfigurationEntity::new("ct");
	stale.controls = vec![Control::assigned("removed", &WidgetKey::builtin("singleLine"))];
	let store = Arc::new(MockStore {
		interfaces: vec![StoredInterface::new(ContentType::new("ct", vec![Field::new("title", "Symbol")]), stale)],
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());

	let written = reconciler(&store, &telemetry).apply_target_state(&json!(null), &acting()).await.unwrap();
	assert!(written.is_empty());
	assert!(store.writes.lock().is_empty());
}

#[tokio::test]
async fn uninstall_removes_references_then_deletes() {
	let mut entity = ConfigurationEntity::new("ct");
	entity.editor = Some(acting().to_ref());
	let store = Arc::new(MockStore {
		interfaces: vec![StoredInterface::new(ContentType::new("ct", vec![Field::new("title", "Symbol")]), entity)],
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());

	let written = reconciler(&store, &telemetry).uninstall("inst-1", &acting()).await.unwrap();
	assert_eq!(written.len(), 1);
	assert_eq!(written[0].editor, None);
	assert_eq!(*store.deleted.lock(), vec!["inst-1".to_string()]);
}

#[tokio::test]
async fn uninstall_propagates_delete_failure() {
	let store = Arc::new(MockStore {
		interfaces: vec![unconfigured("ct")],
		fail_delete: true,
		..MockStore::default()
	});
	let telemetry = Arc::new(RecordingTelemetry::default());

	let err = reconciler(&store, &telemetry).uninstall("inst-1", &acting()).await.unwrap_err();
	assert!(matches!(err, ReconcileError::Uninstall { ref id, .. } if id == "inst-1"));
}
