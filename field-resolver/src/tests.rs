use super::{FieldIndexClient, FieldResolver, ResolveError};
use async_trait::async_trait;
use session_query::{FieldDescriptor, FieldOrigin, OperatorDefaults, OperatorTag, ValueType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct MockFieldIndex {
    fields: HashMap<String, Vec<FieldDescriptor>>,
    fail: Arc<AtomicBool>,
    started: Arc<Notify>,
    release: Option<Arc<Notify>>,
}

impl MockFieldIndex {
    fn new(fields: HashMap<String, Vec<FieldDescriptor>>) -> Self {
        Self {
            fields,
            fail: Arc::new(AtomicBool::new(false)),
            started: Arc::new(Notify::new()),
            release: None,
        }
    }
}

#[async_trait]
impl FieldIndexClient for MockFieldIndex {
    async fn fetch_fields(&self, project_id: &str) -> anyhow::Result<Vec<FieldDescriptor>> {
        self.started.notify_one();
        if let Some(release) = &self.release {
            release.notified().await;
        }
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("field index unreachable");
        }
        self.fields
            .get(project_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown project: {}", project_id))
    }
}

fn dynamic_field(name: &str) -> FieldDescriptor {
    FieldDescriptor::new_dynamic(name, ValueType::Text, &OperatorDefaults::default())
}

fn one_project(project_id: &str, names: &[&str]) -> HashMap<String, Vec<FieldDescriptor>> {
    let mut fields = HashMap::new();
    fields.insert(
        project_id.to_string(),
        names.iter().map(|n| dynamic_field(n)).collect(),
    );
    fields
}

#[tokio::test]
async fn resolve_fetches_and_caches() {
    let mock = MockFieldIndex::new(one_project("p1", &["browser", "environment"]));
    let resolver = FieldResolver::new(mock);
    resolver.set_active_project("p1").unwrap();

    let fields = resolver.resolve("p1").await.unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "browser");
    assert_eq!(resolver.cached("p1").unwrap(), Some(fields));
}

#[tokio::test]
async fn rejects_empty_project_id() {
    let mock = MockFieldIndex::new(HashMap::new());
    let resolver = FieldResolver::new(mock);

    let err = resolver.resolve("").await.unwrap_err();
    assert_eq!(err, ResolveError::EmptyProjectId);
}

#[tokio::test]
async fn returns_cached_set_on_fetch_failure() {
    let mock = MockFieldIndex::new(one_project("p1", &["browser"]));
    let fail = mock.fail.clone();
    let resolver = FieldResolver::new(mock);
    resolver.set_active_project("p1").unwrap();

    let first = resolver.resolve("p1").await.unwrap();
    fail.store(true, Ordering::SeqCst);

    // The index is down, but the previous set keeps the filters usable
    let second = resolver.resolve("p1").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn first_load_failure_surfaces_fields_unavailable() {
    let mock = MockFieldIndex::new(one_project("p1", &["browser"]));
    mock.fail.store(true, Ordering::SeqCst);
    let resolver = FieldResolver::new(mock);
    resolver.set_active_project("p1").unwrap();

    let err = resolver.resolve("p1").await.unwrap_err();
    assert_eq!(err, ResolveError::FieldsUnavailable("p1".to_string()));
}

#[tokio::test]
async fn project_switch_invalidates_other_cache_entries() {
    let mut fields = one_project("p1", &["browser"]);
    fields.extend(one_project("p2", &["environment"]));
    let mock = MockFieldIndex::new(fields);
    let resolver = FieldResolver::new(mock);

    resolver.set_active_project("p1").unwrap();
    resolver.resolve("p1").await.unwrap();
    assert!(resolver.cached("p1").unwrap().is_some());

    resolver.set_active_project("p2").unwrap();
    assert_eq!(resolver.cached("p1").unwrap(), None);
}

#[tokio::test]
async fn stale_response_does_not_overwrite_switched_project() {
    let mut fields = one_project("proj-a", &["browser"]);
    fields.extend(one_project("proj-b", &["environment"]));
    let mut mock = MockFieldIndex::new(fields);
    let started = mock.started.clone();
    let release = Arc::new(Notify::new());
    mock.release = Some(release.clone());

    let resolver = Arc::new(FieldResolver::new(mock));
    resolver.set_active_project("proj-a").unwrap();

    let in_flight = {
        let resolver = resolver.clone();
        tokio::spawn(async move { resolver.resolve("proj-a").await })
    };

    // The user switches projects while proj-a's fetch is suspended
    started.notified().await;
    resolver.set_active_project("proj-b").unwrap();
    release.notify_one();

    let fields = in_flight.await.unwrap().unwrap();
    assert_eq!(fields[0].name, "browser");

    // The late response was answered but never merged
    assert_eq!(resolver.cached("proj-a").unwrap(), None);
    assert_eq!(
        resolver.active_project().unwrap().as_deref(),
        Some("proj-b")
    );
}

#[tokio::test]
async fn normalizes_remote_descriptors() {
    let defaults = OperatorDefaults::default();
    let mut remote = FieldDescriptor::new_static("browser", ValueType::Text, &defaults);
    remote.operators.clear();
    let mut fields = HashMap::new();
    fields.insert("p1".to_string(), vec![remote]);

    let resolver = FieldResolver::new(MockFieldIndex::new(fields));
    resolver.set_active_project("p1").unwrap();

    let resolved = resolver.resolve("p1").await.unwrap();
    assert_eq!(resolved[0].origin, FieldOrigin::Dynamic);
    assert_eq!(
        resolved[0].operators,
        defaults.for_type(ValueType::Text).to_vec()
    );
    assert!(resolved[0].operators.contains(&OperatorTag::Equals));
}
