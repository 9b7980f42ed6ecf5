//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns an ordered collection of
//! entities. It is the "Server" side of the Actor Model: messages are processed one at a time,
//! so the store needs no locks and there is exactly one writer of its snapshot.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::{FrameworkError, SnapshotError};
use crate::message::ResourceRequest;
use crate::snapshot::SnapshotStore;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Where an actor persists its store.
struct Snapshot {
    store: Arc<dyn SnapshotStore>,
    key: String,
}

/// The generic actor that manages an ordered collection of entities.
///
/// # Architecture Note
/// The actor owns the state (`store`) and the receiver end of the channel. Entities keep
/// insertion order (an [`IndexMap`]), which is what a cart view renders.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the `actor` (server) and `client` (interface).
/// 2.  **Persist** (optional): `.with_snapshot(store, key)`.
/// 3.  **Run**: spawn `actor.run(context)` on the runtime.
///
/// ```rust
/// use bakery_actor::{ActorEntity, ResourceActor, MemorySnapshotStore};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Clone, Debug, Serialize, Deserialize)] struct Tray { id: u32, loaves: u32 }
/// #[derive(Debug)] struct TrayCreate(u32);
/// #[derive(Debug)] enum TrayAction {}
/// #[derive(Debug, thiserror::Error)] #[error("tray error")] struct TrayError;
///
/// #[async_trait]
/// impl ActorEntity for Tray {
///     type Id = u32;
///     type Create = TrayCreate;
///     type Update = ();
///     type Action = TrayAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TrayError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, p: TrayCreate) -> Result<Self, TrayError> { Ok(Self { id, loaves: p.0 }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TrayError> { Ok(()) }
///     async fn handle_action(&mut self, a: TrayAction, _: &()) -> Result<(), TrayError> { match a {} }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let ids = std::sync::Mutex::new(0u32);
///     let (actor, client) = ResourceActor::<Tray>::new(10, move || {
///         let mut n = ids.lock().unwrap();
///         *n += 1;
///         *n
///     });
///     let snapshots = MemorySnapshotStore::new();
///     tokio::spawn(actor.with_snapshot(Arc::new(snapshots.clone()), "trays").run(()));
///
///     client.create(TrayCreate(12)).await.unwrap();
///     assert_eq!(client.list().await.unwrap().len(), 1);
///     assert!(snapshots.contains("trays"));
/// }
/// ```
///
/// # Implementation Details
///
/// * **Create**: mints an id with the generator, calls `T::from_create_params`, then
///   `on_create`; only then inserts at the end of the store and persists.
/// * **Get / List**: clones out of the store; never persists.
/// * **Update**: calls `on_update` on the stored entity, persists, returns the new state.
/// * **Delete**: calls `on_delete`, removes the entity keeping the order of the rest, persists.
/// * **Action**: calls `handle_action`; persists when it succeeds.
/// * **Clear**: empties the store and removes the snapshot key.
///
/// Snapshot writes that fail are logged and do not fail the request: the in-memory state stays
/// authoritative for the running session.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
    snapshot: Option<Snapshot>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `next_id_fn` - Generator for the ids of newly created entities.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: IndexMap::new(),
            next_id_fn: Box::new(next_id_fn),
            snapshot: None,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Backs the store with `store` under `key`: restored when the actor starts running,
    /// rewritten after every mutation.
    pub fn with_snapshot(mut self, store: Arc<dyn SnapshotStore>, key: impl Into<String>) -> Self {
        self.snapshot = Some(Snapshot {
            store,
            key: key.into(),
        });
        self
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "CartLine" instead of "harmonic_bakery::model::cart::CartLine")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        self.restore(entity_type);
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            self.persist(entity_type);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let updated = item.clone();
                    self.persist(entity_type);
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(updated));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.shift_remove(&id);
                    self.persist(entity_type);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => {
                            self.persist(entity_type);
                            info!(entity_type, %id, "Action ok");
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Clear { respond_to } => {
                    let cleared = self.store.len();
                    self.store.clear();
                    self.discard_snapshot(entity_type);
                    info!(entity_type, cleared, "Cleared");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Loads the snapshot into the store. Absent, unreadable or malformed snapshots leave the
    /// store empty.
    fn restore(&mut self, entity_type: &str) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let raw = match snapshot.store.load(&snapshot.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(entity_type, key = %snapshot.key, "No snapshot");
                return;
            }
            Err(e) => {
                warn!(entity_type, key = %snapshot.key, error = %e, "Snapshot unreadable, starting empty");
                return;
            }
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => {
                let found = items.len();
                for item in items.into_iter().filter_map(T::on_restore) {
                    self.store.insert(item.id().clone(), item);
                }
                info!(entity_type, found, size = self.store.len(), "Restored");
            }
            Err(e) => {
                warn!(entity_type, key = %snapshot.key, error = %e, "Snapshot malformed, starting empty");
            }
        }
    }

    fn persist(&self, entity_type: &str) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let items: Vec<&T> = self.store.values().collect();
        let written = serde_json::to_string(&items)
            .map_err(SnapshotError::from)
            .and_then(|json| snapshot.store.save(&snapshot.key, &json));
        match written {
            Ok(()) => debug!(entity_type, key = %snapshot.key, size = items.len(), "Persisted"),
            Err(e) => warn!(entity_type, key = %snapshot.key, error = %e, "Snapshot write failed"),
        }
    }

    fn discard_snapshot(&self, entity_type: &str) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        if let Err(e) = snapshot.store.remove(&snapshot.key) {
            warn!(entity_type, key = %snapshot.key, error = %e, "Snapshot removal failed");
        }
    }
}
