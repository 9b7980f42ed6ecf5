//! # Bakery Actor
//!
//! Building blocks for small, persistent, actor-owned state: one Tokio task owns an ordered
//! collection of entities, every caller talks to it through a cloneable client, and the whole
//! collection can be mirrored to a durable key-value slot after each change.
//!
//! ## Why an actor for a handful of cart lines?
//!
//! - **One writer**: every mutation and every snapshot write happens on the actor's task, in
//!   arrival order. Nothing else ever touches the store, so there is nothing to lock.
//! - **Uniform API**: create / get / list / update / delete / action / clear are written once
//!   and reused by every entity type.
//! - **Testability**: each test builds its own actor (or a [`mock::MockClient`]) over a fresh
//!   in-memory snapshot; no ambient global state.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain rules, expressed as lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop, ordered store, snapshots
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async calls
//! 4. **Durability** ([`SnapshotStore`]) - file or memory backed key-value slots
//!
//! ## Example
//!
//! ```rust
//! use bakery_actor::{ActorEntity, MemorySnapshotStore, ResourceActor};
//! use async_trait::async_trait;
//! use serde::{Deserialize, Serialize};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Order { id: u32, dozen: u32 }
//!
//! #[derive(Debug)] struct OrderCreate { dozen: u32 }
//! #[derive(Debug)] struct OrderUpdate { dozen: u32 }
//! #[derive(Debug)] enum OrderAction { Double }
//! #[derive(Debug, thiserror::Error)] #[error("order error")] struct OrderError;
//!
//! #[async_trait]
//! impl ActorEntity for Order {
//!     type Id = u32;
//!     type Create = OrderCreate;
//!     type Update = OrderUpdate;
//!     type Action = OrderAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = OrderError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!
//!     fn from_create_params(id: u32, params: OrderCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, dozen: params.dozen })
//!     }
//!
//!     async fn on_update(&mut self, update: OrderUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         self.dozen = update.dozen;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: OrderAction, _ctx: &()) -> Result<u32, Self::Error> {
//!         match action {
//!             OrderAction::Double => { self.dozen *= 2; Ok(self.dozen) }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let counter = AtomicU32::new(1);
//!     let (actor, client) =
//!         ResourceActor::<Order>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
//!     let snapshots = MemorySnapshotStore::new();
//!     tokio::spawn(actor.with_snapshot(Arc::new(snapshots.clone()), "orders").run(()));
//!
//!     let id = client.create(OrderCreate { dozen: 2 }).await.unwrap();
//!     assert_eq!(client.perform_action(id, OrderAction::Double).await.unwrap(), 4);
//!     assert!(snapshots.get("orders").unwrap().contains("\"dozen\":4"));
//!
//!     client.clear().await.unwrap();
//!     assert!(!snapshots.contains("orders"));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and handles one message at a time
//! - Clients are cheap clones of an mpsc sender
//! - The actor stops when every client has been dropped
//!
//! ## Testing
//!
//! See the [`mock`] module for scripted clients.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod snapshot;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::{FrameworkError, SnapshotError};
pub use message::{ResourceRequest, Response};
pub use snapshot::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
