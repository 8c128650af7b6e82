use serde_json::Value;
use tokio::sync::RwLock;

/// One snapshot of client state: the last successfully fetched collection
/// and the current single record.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub applications: Vec<Value>,
    pub current_application: Option<Value>,
}

/// Explicit state container for the synchronizer. The setters below are the
/// only mutation entry points; a failed request never reaches them, leaving
/// the last good snapshot in place.
#[derive(Debug, Default)]
pub struct ClientStore {
    state: RwLock<ClientState>,
}

impl ClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection (no incremental merge).
    pub async fn set_applications(&self, applications: Vec<Value>) {
        self.state.write().await.applications = applications;
    }

    /// Replace the current single record.
    pub async fn set_application(&self, application: Value) {
        self.state.write().await.current_application = Some(application);
    }

    /// Replace the collection only if `is_current` still holds. The check
    /// runs under the write lock, so a worker superseded while its write was
    /// pending cannot overwrite a newer snapshot. Returns whether the write
    /// applied.
    pub async fn set_applications_if(
        &self,
        applications: Vec<Value>,
        is_current: impl FnOnce() -> bool,
    ) -> bool {
        let mut state = self.state.write().await;
        if !is_current() {
            return false;
        }
        state.applications = applications;
        true
    }

    /// Guarded variant of [`set_application`](Self::set_application).
    pub async fn set_application_if(
        &self,
        application: Value,
        is_current: impl FnOnce() -> bool,
    ) -> bool {
        let mut state = self.state.write().await;
        if !is_current() {
            return false;
        }
        state.current_application = Some(application);
        true
    }

    pub async fn snapshot(&self) -> ClientState {
        self.state.read().await.clone()
    }
}
