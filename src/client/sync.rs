//! Latest-wins dispatcher for the client data layer.
//!
//! Each action type has its own generation counter. A dispatch bumps the
//! counter and spawns the request; when the response arrives, the worker
//! applies it only if its generation is still the latest for that lane.
//! Superseded requests are not cancelled on the wire; they run to completion
//! server-side and their responses are simply discarded. A hung request
//! never resolves and only blocks its own lane.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;

use crate::client::api::ApplicationApi;
use crate::client::dates;
use crate::client::store::ClientStore;

/// Client actions. One latest-wins lane per variant.
#[derive(Debug, Clone)]
pub enum Action {
    FetchApplications,
    FetchApplication(i32),
    PostApplication(Value),
    UpdateApplication { id: i32, payload: Value },
    DeleteApplication(i32),
}

#[derive(Debug, Default)]
struct Lanes {
    fetch_collection: AtomicU64,
    fetch_one: AtomicU64,
    create: AtomicU64,
    update: AtomicU64,
    delete: AtomicU64,
}

impl Lanes {
    fn next(lane: &AtomicU64) -> u64 {
        lane.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(lane: &AtomicU64, generation: u64) -> bool {
        lane.load(Ordering::SeqCst) == generation
    }
}

pub struct Synchronizer<A: ApplicationApi> {
    api: Arc<A>,
    store: Arc<ClientStore>,
    lanes: Arc<Lanes>,
}

impl<A: ApplicationApi> Synchronizer<A> {
    pub fn new(api: A, store: Arc<ClientStore>) -> Self {
        Self {
            api: Arc::new(api),
            store,
            lanes: Arc::new(Lanes::default()),
        }
    }

    pub fn store(&self) -> Arc<ClientStore> {
        self.store.clone()
    }

    /// Start one worker for the action. The returned handle resolves when
    /// the worker finishes (including any follow-up collection re-fetch);
    /// a superseded worker finishes without touching state.
    pub fn dispatch(&self, action: Action) -> JoinHandle<()> {
        let api = self.api.clone();
        let store = self.store.clone();
        let lanes = self.lanes.clone();

        match action {
            Action::FetchApplications => {
                let generation = Lanes::next(&lanes.fetch_collection);
                tokio::spawn(fetch_applications(api, store, lanes, generation))
            }
            Action::FetchApplication(id) => {
                let generation = Lanes::next(&lanes.fetch_one);
                tokio::spawn(fetch_application(api, store, lanes, generation, id))
            }
            Action::PostApplication(payload) => {
                let generation = Lanes::next(&lanes.create);
                tokio::spawn(post_application(api, store, lanes, generation, payload))
            }
            Action::UpdateApplication { id, payload } => {
                let generation = Lanes::next(&lanes.update);
                tokio::spawn(update_application(api, store, lanes, generation, id, payload))
            }
            Action::DeleteApplication(id) => {
                let generation = Lanes::next(&lanes.delete);
                tokio::spawn(delete_application(api, store, lanes, generation, id))
            }
        }
    }
}

/// Worker for FetchApplications: list, localize dates, replace the
/// collection wholesale.
async fn fetch_applications<A: ApplicationApi>(
    api: Arc<A>,
    store: Arc<ClientStore>,
    lanes: Arc<Lanes>,
    generation: u64,
) {
    match api.fetch_applications().await {
        Ok(mut records) => {
            dates::localize_collection(&mut records);
            // The currency check runs under the store's write lock; a
            // supersede landing between the response and the write is
            // still caught.
            let applied = store
                .set_applications_if(records, || {
                    Lanes::is_current(&lanes.fetch_collection, generation)
                })
                .await;
            if !applied {
                tracing::debug!("fetch_applications superseded, discarding response");
            }
        }
        Err(error) => tracing::error!("Error in fetch_applications: {}", error),
    }
}

/// Worker for FetchApplication: one record, localized, published as the
/// current record.
async fn fetch_application<A: ApplicationApi>(
    api: Arc<A>,
    store: Arc<ClientStore>,
    lanes: Arc<Lanes>,
    generation: u64,
    id: i32,
) {
    match api.fetch_application(id).await {
        Ok(mut record) => {
            dates::localize_record(&mut record);
            let applied = store
                .set_application_if(record, || Lanes::is_current(&lanes.fetch_one, generation))
                .await;
            if !applied {
                tracing::debug!("fetch_application superseded, discarding response");
            }
        }
        Err(error) => tracing::error!("Error in fetch_application: {}", error),
    }
}

async fn post_application<A: ApplicationApi>(
    api: Arc<A>,
    store: Arc<ClientStore>,
    lanes: Arc<Lanes>,
    generation: u64,
    payload: Value,
) {
    match api.post_application(payload).await {
        Ok(()) => {
            if !Lanes::is_current(&lanes.create, generation) {
                return;
            }
            refetch_collection(api, store, lanes).await;
        }
        Err(error) => tracing::error!("Error in post_application: {}", error),
    }
}

async fn update_application<A: ApplicationApi>(
    api: Arc<A>,
    store: Arc<ClientStore>,
    lanes: Arc<Lanes>,
    generation: u64,
    id: i32,
    payload: Value,
) {
    match api.update_application(id, payload).await {
        Ok(()) => {
            if !Lanes::is_current(&lanes.update, generation) {
                return;
            }
            refetch_collection(api, store, lanes).await;
        }
        Err(error) => tracing::error!("Error in update_application: {}", error),
    }
}

async fn delete_application<A: ApplicationApi>(
    api: Arc<A>,
    store: Arc<ClientStore>,
    lanes: Arc<Lanes>,
    generation: u64,
    id: i32,
) {
    match api.delete_application(id).await {
        Ok(()) => {
            if !Lanes::is_current(&lanes.delete, generation) {
                return;
            }
            refetch_collection(api, store, lanes).await;
        }
        Err(error) => tracing::error!("Error in delete_application: {}", error),
    }
}

/// Full re-fetch after a successful mutation; no optimistic update. This is
/// itself the newest fetch dispatch, so it supersedes any in-flight fetch.
async fn refetch_collection<A: ApplicationApi>(
    api: Arc<A>,
    store: Arc<ClientStore>,
    lanes: Arc<Lanes>,
) {
    let generation = Lanes::next(&lanes.fetch_collection);
    fetch_applications(api, store, lanes, generation).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::ClientError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Fetch stub: the first collection fetch is slow, later ones fast.
    struct SlowFirstFetch {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ApplicationApi for SlowFirstFetch {
        async fn fetch_applications(&self) -> Result<Vec<Value>, ClientError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(vec![json!({"id": "first"})])
            } else {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok(vec![json!({"id": "second"})])
            }
        }

        async fn fetch_application(&self, _id: i32) -> Result<Value, ClientError> {
            unreachable!()
        }
        async fn post_application(&self, _payload: Value) -> Result<(), ClientError> {
            unreachable!()
        }
        async fn update_application(&self, _id: i32, _payload: Value) -> Result<(), ClientError> {
            unreachable!()
        }
        async fn delete_application(&self, _id: i32) -> Result<(), ClientError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn latest_wins_discards_stale_collection_response() {
        let store = Arc::new(ClientStore::new());
        let sync = Synchronizer::new(
            SlowFirstFetch {
                calls: AtomicUsize::new(0),
            },
            store.clone(),
        );

        let first = sync.dispatch(Action::FetchApplications);
        // Let the first worker start its (slow) request before superseding it
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = sync.dispatch(Action::FetchApplications);

        second.await.expect("second worker");
        first.await.expect("first worker");

        // The first response resolves later but must not overwrite the
        // second's result
        let state = store.snapshot().await;
        assert_eq!(state.applications, vec![json!({"id": "second"})]);
    }

    #[tokio::test]
    async fn stale_write_is_rejected_even_after_newer_result_lands() {
        let store = Arc::new(ClientStore::new());
        let lanes = Lanes::default();

        // Two dispatches; the second's response is applied first.
        let stale_generation = Lanes::next(&lanes.fetch_collection);
        let newer_generation = Lanes::next(&lanes.fetch_collection);

        assert!(
            store
                .set_applications_if(vec![json!({"id": "newer"})], || {
                    Lanes::is_current(&lanes.fetch_collection, newer_generation)
                })
                .await
        );

        // The stale worker's write reaches the store afterwards; the check
        // under the lock discards it.
        let applied = store
            .set_applications_if(vec![json!({"id": "stale"})], || {
                Lanes::is_current(&lanes.fetch_collection, stale_generation)
            })
            .await;

        assert!(!applied);
        let state = store.snapshot().await;
        assert_eq!(state.applications, vec![json!({"id": "newer"})]);
    }

    /// Mutation stub: records the mutation and serves a canned collection.
    struct MutatingStub {
        fetches: AtomicUsize,
        posts: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl MutatingStub {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                posts: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ApplicationApi for MutatingStub {
        async fn fetch_applications(&self) -> Result<Vec<Value>, ClientError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![json!({"id": 1, "filed_date": "2023-04-01"})])
        }

        async fn fetch_application(&self, _id: i32) -> Result<Value, ClientError> {
            Ok(json!({"id": 1, "filed_date": "2023-04-01", "title": "Widget"}))
        }

        async fn post_application(&self, _payload: Value) -> Result<(), ClientError> {
            self.posts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn update_application(&self, _id: i32, _payload: Value) -> Result<(), ClientError> {
            Ok(())
        }

        async fn delete_application(&self, _id: i32) -> Result<(), ClientError> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn mutation_triggers_full_refetch() {
        let store = Arc::new(ClientStore::new());
        let sync = Synchronizer::new(MutatingStub::new(), store.clone());

        sync.dispatch(Action::PostApplication(json!({"title": "Widget"})))
            .await
            .expect("worker");

        let state = store.snapshot().await;
        assert_eq!(state.applications.len(), 1);
        // Dates are localized on the refetch path too
        assert_eq!(state.applications[0]["filed_date"], "04/01/2023");
    }

    #[tokio::test]
    async fn delete_refetches_instead_of_patching_state() {
        let store = Arc::new(ClientStore::new());
        store.set_applications(vec![json!({"id": 7})]).await;
        let sync = Synchronizer::new(MutatingStub::new(), store.clone());

        sync.dispatch(Action::DeleteApplication(7)).await.expect("worker");

        let state = store.snapshot().await;
        // State reflects the server's collection, not a local removal
        assert_eq!(state.applications, vec![json!({"id": 1, "filed_date": "04/01/2023"})]);
    }

    #[tokio::test]
    async fn single_fetch_localizes_dates_and_sets_current() {
        let store = Arc::new(ClientStore::new());
        let sync = Synchronizer::new(MutatingStub::new(), store.clone());

        sync.dispatch(Action::FetchApplication(1)).await.expect("worker");

        let state = store.snapshot().await;
        let current = state.current_application.expect("current record");
        assert_eq!(current["filed_date"], "04/01/2023");
        assert_eq!(current["title"], "Widget");
    }

    /// Stub whose every request fails.
    struct FailingStub;

    #[async_trait]
    impl ApplicationApi for FailingStub {
        async fn fetch_applications(&self) -> Result<Vec<Value>, ClientError> {
            Err(ClientError::Status { status: 500 })
        }
        async fn fetch_application(&self, _id: i32) -> Result<Value, ClientError> {
            Err(ClientError::Status { status: 500 })
        }
        async fn post_application(&self, _payload: Value) -> Result<(), ClientError> {
            Err(ClientError::Status { status: 500 })
        }
        async fn update_application(&self, _id: i32, _payload: Value) -> Result<(), ClientError> {
            Err(ClientError::Status { status: 500 })
        }
        async fn delete_application(&self, _id: i32) -> Result<(), ClientError> {
            Err(ClientError::Status { status: 500 })
        }
    }

    #[tokio::test]
    async fn failed_request_leaves_state_stale() {
        let store = Arc::new(ClientStore::new());
        store.set_applications(vec![json!({"id": "stale"})]).await;
        let sync = Synchronizer::new(FailingStub, store.clone());

        sync.dispatch(Action::FetchApplications).await.expect("worker");
        sync.dispatch(Action::UpdateApplication {
            id: 1,
            payload: json!({}),
        })
        .await
        .expect("worker");

        // Last successfully fetched snapshot survives every failure
        let state = store.snapshot().await;
        assert_eq!(state.applications, vec![json!({"id": "stale"})]);
    }
}
