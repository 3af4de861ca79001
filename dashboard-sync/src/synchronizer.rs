//! Generic fetch-once synchronizer.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──activate──▶ Loading ──success payload──────────▶ Ready ──optimistic write──▶ Ready
//!                       └────envelope / mismatch / I/O──▶ Failed
//! ```
//!
//! `activate` runs at most once per instance: the fetch guard is latched before
//! the request is issued, so a second call (concurrent or later) returns
//! without touching the network. `Failed` is terminal; build a new instance to
//! retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use dashboard_core::{
    classify, Classified, FieldMerge, GuildId, NormalizedError, Resource, ResourceState,
    WriteBackMode,
};

use crate::transport::Transport;

/// Side effect run when the backend reports an expired session.
pub type UnauthorizedHook = Box<dyn Fn() + Send + Sync>;

/// Result of [`Synchronizer::write`].
#[derive(Debug)]
pub enum WriteAck {
    /// Optimistic mode: local state already reflects the update (when it was
    /// `Ready`); the POST runs in the background.
    Applied(PendingWrite),
    /// Confirmed mode: the decoded server response, verbatim.
    Confirmed(Value),
}

/// Background POST issued by an optimistic write.
///
/// Dropping it detaches the request; nothing is retried or rolled back.
#[derive(Debug)]
pub struct PendingWrite {
    applied_locally: bool,
    handle: JoinHandle<Result<(), NormalizedError>>,
}

impl PendingWrite {
    /// Whether the local state was replaced. `false` when the resource was not
    /// `Ready` at the time of the write.
    pub fn applied_locally(&self) -> bool {
        self.applied_locally
    }

    /// Wait for the background POST and surface its outcome.
    pub async fn settled(self) -> Result<(), NormalizedError> {
        self.handle
            .await
            .unwrap_or_else(|_| Err(NormalizedError::internal()))
    }
}

/// Owns the observable state of one remote resource.
pub struct Synchronizer<T, C> {
    resource: Resource<T>,
    transport: Arc<C>,
    state: watch::Sender<ResourceState<T>>,
    fetch_guard: AtomicBool,
    on_unauthorized: Option<UnauthorizedHook>,
    unauthorized_fired: AtomicBool,
}

impl<T, C> Synchronizer<T, C>
where
    T: DeserializeOwned + Serialize + Clone + Send + Sync + 'static,
    C: Transport,
{
    pub fn new(resource: Resource<T>, transport: Arc<C>) -> Self {
        let (state, _) = watch::channel(ResourceState::Idle);
        Self {
            resource,
            transport,
            state,
            fetch_guard: AtomicBool::new(false),
            on_unauthorized: None,
            unauthorized_fired: AtomicBool::new(false),
        }
    }

    /// Install the hook fired on an `UNAUTHORIZED` server error. Only resources
    /// built with unauthorized escalation ever call it.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Box::new(hook));
        self
    }

    /// Share the instance and kick off its one fetch on the current tokio
    /// runtime.
    pub fn start(self) -> Arc<Self> {
        let this = Arc::new(self);
        let task = Arc::clone(&this);
        tokio::spawn(async move { task.activate().await });
        this
    }

    pub fn resource(&self) -> &Resource<T> {
        &self.resource
    }

    /// Guild this instance was built for, if the resource is guild-scoped.
    pub fn identity(&self) -> Option<&GuildId> {
        self.resource.identity()
    }

    /// Current state, cloned.
    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.state.subscribe()
    }

    /// Wait until the state leaves `Idle`/`Loading`.
    ///
    /// Never returns for an instance that is not activated, or whose fetch
    /// never resolves.
    pub async fn settled(&self) -> Result<T, NormalizedError> {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|state| !state.is_pending()).await {
            Ok(state) => state.clone(),
            Err(_) => return Err(NormalizedError::internal()),
        };
        state
            .into_result()
            .unwrap_or_else(|| Err(NormalizedError::internal()))
    }

    /// Fetch the resource once. Later calls are no-ops.
    pub async fn activate(&self) {
        let label = self.resource.label();
        if self.fetch_guard.swap(true, Ordering::AcqRel) {
            tracing::debug!(resource = label, "fetch already started, skipping");
            return;
        }

        tracing::debug!(resource = label, path = self.resource.path(), "fetching");
        self.state.send_replace(ResourceState::Loading);

        let classified = match self.transport.get(self.resource.path()).await {
            Ok(payload) => classify::<T>(payload, self.resource.predicate()),
            Err(err) => {
                tracing::warn!(resource = label, error = %err, "transport failure");
                Classified::Unrecognized
            }
        };

        let next = match classified {
            Classified::Success(data) => {
                tracing::info!(resource = label, "resource ready");
                ResourceState::Ready(data)
            }
            Classified::ServerError(error) => {
                tracing::warn!(
                    resource = label,
                    code = %error.code,
                    status = error.status,
                    message = %error.message,
                    "server reported error"
                );
                self.escalate(&error);
                ResourceState::Failed(error)
            }
            Classified::Unrecognized => {
                tracing::warn!(resource = label, "unrecognized or missing payload");
                ResourceState::Failed(NormalizedError::internal())
            }
        };
        self.state.send_replace(next);
    }

    /// Write `update` back according to the resource's [`WriteBackMode`].
    ///
    /// In optimistic mode the local state is replaced before this future first
    /// yields and the returned [`PendingWrite`] tracks the background POST;
    /// this requires a tokio runtime. In confirmed mode the POST is awaited
    /// and local state is never touched; transport and decode failures come
    /// back as [`NormalizedError::internal`].
    pub async fn write(&self, update: T) -> Result<WriteAck, NormalizedError> {
        match self.resource.mode() {
            WriteBackMode::Optimistic => Ok(WriteAck::Applied(self.write_optimistic(update))),
            WriteBackMode::Confirmed => self.write_confirmed(&update).await.map(WriteAck::Confirmed),
        }
    }

    fn write_optimistic(&self, update: T) -> PendingWrite {
        let label = self.resource.label();
        let body = serde_json::to_value(&update);
        let applied_locally = self.state.send_if_modified(|state| match state {
            ResourceState::Ready(data) => {
                *data = update;
                true
            }
            _ => false,
        });
        if !applied_locally {
            tracing::debug!(resource = label, "write before ready, local state untouched");
        }

        let transport = Arc::clone(&self.transport);
        let path = self.resource.path().to_string();
        let handle = tokio::spawn(async move {
            let body = body.map_err(|err| {
                tracing::warn!(resource = label, error = %err, "failed to encode update");
                NormalizedError::internal()
            })?;
            match transport.post(&path, &body).await {
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::warn!(resource = label, error = %err, "background write failed");
                    Err(NormalizedError::internal())
                }
            }
        });

        PendingWrite {
            applied_locally,
            handle,
        }
    }

    async fn write_confirmed(&self, update: &T) -> Result<Value, NormalizedError> {
        let label = self.resource.label();
        let body = serde_json::to_value(update).map_err(|err| {
            tracing::warn!(resource = label, error = %err, "failed to encode update");
            NormalizedError::internal()
        })?;
        self.transport
            .post(self.resource.path(), &body)
            .await
            .map_err(|err| {
                tracing::warn!(resource = label, error = %err, "confirmed write failed");
                NormalizedError::internal()
            })
    }

    /// Replace one field of the `Ready` data. Returns `false` (and leaves the
    /// state alone) in any other state. Local only; nothing is sent.
    pub fn merge_field(&self, field: T::Field, value: impl Into<String>) -> bool
    where
        T: FieldMerge,
    {
        let value = value.into();
        self.state.send_if_modified(|state| match state {
            ResourceState::Ready(data) => {
                data.merge_field(field, value);
                true
            }
            _ => false,
        })
    }

    fn escalate(&self, error: &NormalizedError) {
        if !self.resource.escalates_unauthorized() || !error.is_unauthorized() {
            return;
        }
        let Some(hook) = self.on_unauthorized.as_ref() else {
            return;
        };
        if self.unauthorized_fired.swap(true, Ordering::AcqRel) {
            return;
        }
        tracing::info!(resource = self.resource.label(), "session unauthorized, escalating");
        hook();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use dashboard_core::{GuildProfile, GuildProfileField};
    use serde_json::json;

    use super::*;
    use crate::error::TransportError;

    struct CountingTransport {
        gets: AtomicUsize,
    }

    impl Transport for CountingTransport {
        async fn get(&self, _path: &str) -> Result<Value, TransportError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            Ok(json!({"id": "1", "name": "Hub"}))
        }

        async fn post(&self, _path: &str, _body: &Value) -> Result<Value, TransportError> {
            Ok(Value::Null)
        }
    }

    fn profile_sync() -> Synchronizer<GuildProfile, CountingTransport> {
        Synchronizer::new(
            Resource::guild_profile(),
            Arc::new(CountingTransport {
                gets: AtomicUsize::new(0),
            }),
        )
    }

    #[test]
    fn new_instance_is_idle() {
        let sync = profile_sync();
        assert_eq!(sync.snapshot(), ResourceState::Idle);
        assert!(sync.identity().is_none());
    }

    #[test]
    fn merge_field_on_idle_is_noop() {
        let sync = profile_sync();
        assert!(!sync.merge_field(GuildProfileField::Name, "X"));
        assert_eq!(sync.snapshot(), ResourceState::Idle);
    }

    #[test]
    fn settled_stays_pending_until_activated() {
        let sync = profile_sync();
        let mut settled = tokio_test::task::spawn(sync.settled());
        tokio_test::assert_pending!(settled.poll());
        assert_eq!(sync.transport.gets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn guard_latches_after_first_activation() {
        let sync = profile_sync();
        sync.activate().await;
        sync.activate().await;
        assert_eq!(sync.transport.gets.load(Ordering::SeqCst), 1);
        assert_eq!(sync.snapshot().data().map(|p| p.name.as_str()), Some("Hub"));
    }
}
