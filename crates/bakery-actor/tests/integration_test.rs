use bakery_actor::{
    ActorClient, ActorEntity, FileSnapshotStore, FrameworkError, MemorySnapshotStore,
    ResourceActor, ResourceClient, SnapshotStore,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Loaf {
    id: u32,
    name: String,
    count: u32,
}

#[derive(Debug)]
struct LoafCreate {
    name: String,
    count: u32,
}

#[derive(Debug)]
struct LoafUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum LoafAction {
    Bake(u32),
    Burn,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum LoafError {
    #[error("a loaf needs a name")]
    Unnamed,
    #[error("burnt")]
    Burnt,
}

#[async_trait]
impl ActorEntity for Loaf {
    type Id = u32;
    type Create = LoafCreate;
    type Update = LoafUpdate;
    type Action = LoafAction;
    type ActionResult = u32;
    type Context = ();
    type Error = LoafError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: LoafCreate) -> Result<Self, Self::Error> {
        if params.name.is_empty() {
            return Err(LoafError::Unnamed);
        }
        Ok(Self {
            id,
            name: params.name,
            count: params.count,
        })
    }

    async fn on_update(&mut self, update: LoafUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: LoafAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            LoafAction::Bake(n) => {
                self.count += n;
                Ok(self.count)
            }
            LoafAction::Burn => Err(LoafError::Burnt),
        }
    }

    fn on_restore(self) -> Option<Self> {
        (self.count > 0).then_some(self)
    }
}

struct LoafClient {
    inner: ResourceClient<Loaf>,
}

#[async_trait]
impl ActorClient<Loaf> for LoafClient {
    type Error = FrameworkError;

    fn inner(&self) -> &ResourceClient<Loaf> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e
    }
}

const KEY: &str = "loaves";

fn spawn_actor(
    store: Arc<dyn SnapshotStore>,
    first_id: u32,
) -> (ResourceClient<Loaf>, tokio::task::JoinHandle<()>) {
    let counter = AtomicU32::new(first_id);
    let (actor, client) = ResourceActor::<Loaf>::new(10, move || {
        counter.fetch_add(1, Ordering::SeqCst)
    });
    let handle = tokio::spawn(actor.with_snapshot(store, KEY).run(()));
    (client, handle)
}

fn create(name: &str, count: u32) -> LoafCreate {
    LoafCreate {
        name: name.to_string(),
        count,
    }
}

fn names(loaves: &[Loaf]) -> Vec<&str> {
    loaves.iter().map(|l| l.name.as_str()).collect()
}

#[tokio::test]
async fn test_crud_and_actions_keep_insertion_order() {
    let (client, handle) = spawn_actor(Arc::new(MemorySnapshotStore::new()), 1);

    let rye = client.create(create("rye", 1)).await.unwrap();
    let sourdough = client.create(create("sourdough", 2)).await.unwrap();
    let brioche = client.create(create("brioche", 3)).await.unwrap();

    let updated = client
        .update(
            sourdough,
            LoafUpdate {
                name: Some("country".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "country");

    assert_eq!(client.perform_action(rye, LoafAction::Bake(4)).await.unwrap(), 5);

    client.delete(sourdough).await.unwrap();
    let loaves = client.list().await.unwrap();
    assert_eq!(names(&loaves), vec!["rye", "brioche"]);
    assert_eq!(client.get(brioche).await.unwrap().unwrap().count, 3);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failures_leave_store_untouched() {
    let snapshots = MemorySnapshotStore::new();
    let (client, _handle) = spawn_actor(Arc::new(snapshots.clone()), 1);

    let err = client.create(create("", 1)).await.unwrap_err();
    assert_eq!(err.downcast_entity::<LoafError>().unwrap(), LoafError::Unnamed);
    assert!(!snapshots.contains(KEY), "failed create must not persist");

    let id = client.create(create("rye", 1)).await.unwrap();
    let err = client.perform_action(id, LoafAction::Burn).await.unwrap_err();
    assert_eq!(err.downcast_entity::<LoafError>().unwrap(), LoafError::Burnt);

    assert!(matches!(
        client.delete(99).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.perform_action(99, LoafAction::Bake(1)).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert_eq!(client.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_snapshot_written_after_every_mutation_and_restored() {
    let snapshots = MemorySnapshotStore::new();
    let (client, handle) = spawn_actor(Arc::new(snapshots.clone()), 1);

    let rye = client.create(create("rye", 1)).await.unwrap();
    client.create(create("brioche", 2)).await.unwrap();
    client.perform_action(rye, LoafAction::Bake(1)).await.unwrap();

    let raw = snapshots.get(KEY).unwrap();
    let stored: Vec<Loaf> = serde_json::from_str(&raw).unwrap();
    assert_eq!(names(&stored), vec!["rye", "brioche"]);
    assert_eq!(stored[0].count, 2);

    drop(client);
    handle.await.unwrap();

    // A new session sees the same collection
    let (client, _handle) = spawn_actor(Arc::new(snapshots.clone()), 100);
    let restored = client.list().await.unwrap();
    assert_eq!(restored, stored);
}

#[tokio::test]
async fn test_restore_applies_entity_hook() {
    let snapshots = MemorySnapshotStore::new();
    snapshots
        .save(
            KEY,
            r#"[{"id":1,"name":"rye","count":0},{"id":2,"name":"brioche","count":2}]"#,
        )
        .unwrap();

    let (client, _handle) = spawn_actor(Arc::new(snapshots), 10);
    assert_eq!(names(&client.list().await.unwrap()), vec!["brioche"]);
}

#[tokio::test]
async fn test_malformed_snapshot_starts_empty() {
    for raw in ["not json", "{\"id\":1}", "[{\"id\":\"x\"}]"] {
        let snapshots = MemorySnapshotStore::new();
        snapshots.save(KEY, raw).unwrap();

        let (client, _handle) = spawn_actor(Arc::new(snapshots.clone()), 1);
        assert!(client.list().await.unwrap().is_empty(), "input: {raw}");

        // The actor stays usable and overwrites the bad snapshot on the next mutation
        client.create(create("rye", 1)).await.unwrap();
        let stored: Vec<Loaf> = serde_json::from_str(&snapshots.get(KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
    }
}

#[tokio::test]
async fn test_clear_removes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileSnapshotStore::new(dir.path()));
    let (client, _handle) = spawn_actor(store.clone(), 1);

    client.create(create("rye", 1)).await.unwrap();
    assert!(dir.path().join("loaves.json").exists());

    client.clear().await.unwrap();
    assert!(client.list().await.unwrap().is_empty());
    assert!(!dir.path().join("loaves.json").exists());

    let (fresh, _handle) = spawn_actor(store, 1);
    assert!(fresh.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_actor_client_defaults() {
    let (inner, _handle) = spawn_actor(Arc::new(MemorySnapshotStore::new()), 1);
    let id = inner.create(create("rye", 1)).await.unwrap();
    let client = LoafClient { inner };

    assert_eq!(client.get(id).await.unwrap().unwrap().name, "rye");
    assert_eq!(client.list().await.unwrap().len(), 1);
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_closed_actor_reports_error() {
    let (actor, client) = ResourceActor::<Loaf>::new(10, || 1);
    drop(actor);

    assert!(matches!(
        client.list().await,
        Err(FrameworkError::ActorClosed)
    ));
}
