//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource (a cart line, an order draft, ...) implements
//! to be managed by the generic [`ResourceActor`](crate::ResourceActor). It names the associated
//! types for ids, DTOs, actions, context and errors, and provides the lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`, `on_restore`).
//!
//! # Architecture Note
//! The actor loop is written once against this trait. Associated types keep every request
//! type-checked: a `CartLine` actor only ever accepts a `CartLineCreate` payload.
//!
//! # Snapshots
//! Entities are `Serialize + DeserializeOwned` so that an actor configured with a
//! [`SnapshotStore`](crate::snapshot::SnapshotStore) can write its whole ordered store after every
//! mutation and read it back when it starts.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::on_restore`]
//!
//! The defaults do nothing.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they may call other actors. The `Context` type is injected into
/// every hook when the actor starts running ("late binding" of dependencies).
#[async_trait]
pub trait ActorEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The unique identifier for this entity. Ids are minted by the id generator handed to
    /// [`ResourceActor::new`](crate::ResourceActor::new).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `AdjustQuantity`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message; clients deal with a single error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The id this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`; returning an error leaves the store
    /// untouched.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Snapshot Hook ---

    /// Called for every entity read back from a snapshot. Return `None` to drop it.
    ///
    /// Snapshots live outside the process and may have been edited or written by an older
    /// version, so this is the place to re-establish invariants.
    fn on_restore(self) -> Option<Self> {
        Some(self)
    }
}
