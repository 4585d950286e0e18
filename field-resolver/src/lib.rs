use async_trait::async_trait;
use session_query::{FieldDescriptor, FieldOrigin, OperatorDefaults};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Remote field index client for fetching project-specific fields
#[async_trait]
pub trait FieldIndexClient: Send + Sync {
    async fn fetch_fields(&self, project_id: &str) -> anyhow::Result<Vec<FieldDescriptor>>;
}

/// Error types for dynamic field resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    EmptyProjectId,
    FieldsUnavailable(String),
    LockPoisoned,
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::EmptyProjectId => write!(f, "Project id must be non-empty"),
            ResolveError::FieldsUnavailable(project_id) => {
                write!(f, "Dynamic fields unavailable for project {}", project_id)
            }
            ResolveError::LockPoisoned => write!(f, "Resolver state lock poisoned"),
        }
    }
}

impl std::error::Error for ResolveError {}

#[derive(Debug, Default)]
struct ResolverState {
    active_project: Option<String>,
    cache: HashMap<String, Vec<FieldDescriptor>>,
}

/// Fetches and caches per-project dynamic field descriptors.
///
/// The fetch is the only suspension point in the search-filter layer. The
/// cache holds one descriptor set per project for the lifetime of the
/// current search session; switching the active project invalidates the
/// entries of every other project. A response that arrives for a project
/// that is no longer active is not merged into the cache.
pub struct FieldResolver<C> {
    client: C,
    defaults: OperatorDefaults,
    state: Arc<RwLock<ResolverState>>,
}

impl<C: FieldIndexClient> FieldResolver<C> {
    pub fn new(client: C) -> Self {
        Self::with_defaults(client, OperatorDefaults::default())
    }

    pub fn with_defaults(client: C, defaults: OperatorDefaults) -> Self {
        Self {
            client,
            defaults,
            state: Arc::new(RwLock::new(ResolverState::default())),
        }
    }

    /// Switch project context. Cached sets of other projects are dropped.
    pub fn set_active_project(&self, project_id: &str) -> Result<(), ResolveError> {
        let mut state = self.state.write().map_err(|_| ResolveError::LockPoisoned)?;
        if state.active_project.as_deref() == Some(project_id) {
            return Ok(());
        }
        state.cache.retain(|cached, _| cached == project_id);
        state.active_project = Some(project_id.to_string());
        Ok(())
    }

    pub fn active_project(&self) -> Result<Option<String>, ResolveError> {
        let state = self.state.read().map_err(|_| ResolveError::LockPoisoned)?;
        Ok(state.active_project.clone())
    }

    /// Synchronous peek at the cached set for a project.
    pub fn cached(&self, project_id: &str) -> Result<Option<Vec<FieldDescriptor>>, ResolveError> {
        let state = self.state.read().map_err(|_| ResolveError::LockPoisoned)?;
        Ok(state.cache.get(project_id).cloned())
    }

    /// Fetch the dynamic field set for a project.
    ///
    /// On success the set is cached and returned, unless the project lost
    /// its active status while the fetch was in flight: a stale response is
    /// returned to its caller but never written back. On failure the
    /// previous cached set is returned if one exists; a first load with no
    /// cache surfaces [`ResolveError::FieldsUnavailable`].
    pub async fn resolve(&self, project_id: &str) -> Result<Vec<FieldDescriptor>, ResolveError> {
        if project_id.is_empty() {
            return Err(ResolveError::EmptyProjectId);
        }

        match self.client.fetch_fields(project_id).await {
            Ok(fields) => {
                let fields = self.normalize(fields);
                let mut state = self.state.write().map_err(|_| ResolveError::LockPoisoned)?;
                let requested_is_active = match state.active_project.as_deref() {
                    Some(active) => active == project_id,
                    // No context set yet: nothing to go stale against
                    None => true,
                };
                if requested_is_active {
                    state.cache.insert(project_id.to_string(), fields.clone());
                    tracing::info!(
                        "field index refreshed: {} fields for project {}",
                        fields.len(),
                        project_id
                    );
                } else {
                    tracing::debug!(
                        "discarding stale field index response for project {}",
                        project_id
                    );
                }
                Ok(fields)
            }
            Err(e) => {
                tracing::warn!("field index fetch failed for project {}: {:#}", project_id, e);
                let state = self.state.read().map_err(|_| ResolveError::LockPoisoned)?;
                state
                    .cache
                    .get(project_id)
                    .cloned()
                    .ok_or_else(|| ResolveError::FieldsUnavailable(project_id.to_string()))
            }
        }
    }

    /// Remote descriptors are dynamic by definition; an empty operator set
    /// means the index left the choice to us, so the per-type defaults
    /// apply.
    fn normalize(&self, fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
        fields
            .into_iter()
            .map(|mut field| {
                field.origin = FieldOrigin::Dynamic;
                if field.operators.is_empty() {
                    field.operators = self.defaults.for_type(field.value_type).to_vec();
                }
                field
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
