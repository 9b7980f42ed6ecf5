//! # ActorClient Trait
//!
//! Common surface for resource-specific clients: default `get`, `list` and `delete` built on
//! top of the wrapped `ResourceClient`, with errors mapped into the client's own type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read/delete operations.
///
/// # Example
///
/// ```rust
/// use bakery_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Loaf { id: u32 }
/// #[derive(Debug)] struct LoafCreate;
/// #[derive(Debug)] enum LoafAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct LoafError(String);
///
/// #[async_trait]
/// impl ActorEntity for Loaf {
///     type Id = u32;
///     type Create = LoafCreate;
///     type Update = ();
///     type Action = LoafAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = LoafError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: LoafCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: LoafAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct LoafClient {
///     inner: ResourceClient<Loaf>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Loaf> for LoafClient {
///     type Error = LoafError;
///
///     fn inner(&self) -> &ResourceClient<Loaf> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         LoafError(e.to_string())
///     }
/// }
///
/// // get(), list() and delete() are provided
/// async fn usage(client: LoafClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, in insertion order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
