//! # Cart Client
//!
//! Provides a high-level API for the cart actor. It wraps a `ResourceClient<CartLine>` and
//! exposes the cart operations the storefront needs, with errors mapped into [`CartError`].
use crate::cart_actor::{CartError, CartLineAction};
use crate::model::{Cart, CartLine, CartLineCreate, CartLineId, CartLineUpdate, MenuItem, Money};
use async_trait::async_trait;
use bakery_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartLine>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartLine>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<CartLine> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartLine> {
        &self.inner
    }

    /// Entity errors come back as the [`CartError`] the entity raised; everything else is a
    /// communication failure.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CartError>() {
            Ok(cart_error) => cart_error,
            Err(FrameworkError::NotFound(id)) => CartError::NotFound(id),
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CartClient {
    /// Appends a configured item to the cart and returns the new line's id.
    ///
    /// `quantity` is clamped to at least 1. Fails without touching the cart when the item has
    /// options and `option` is empty or not one of them.
    #[instrument(skip(self, item, notes), fields(item = %item.id))]
    pub async fn add_line(
        &self,
        item: &MenuItem,
        option: &str,
        quantity: u32,
        notes: &str,
    ) -> Result<CartLineId, CartError> {
        debug!("Sending request");
        let params = CartLineCreate {
            item: item.clone(),
            option: option.to_string(),
            batches: quantity,
            notes: notes.to_string(),
        };
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Removes a line. Removing a line that is not in the cart is not an error.
    #[instrument(skip(self))]
    pub async fn remove_line(&self, id: CartLineId) -> Result<(), CartError> {
        match self.delete(id).await {
            Ok(()) | Err(CartError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Changes a line's batch count by `delta` and returns the new count, which is never below 1.
    #[instrument(skip(self))]
    pub async fn adjust_quantity(&self, id: CartLineId, delta: i32) -> Result<u32, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, CartLineAction::AdjustQuantity(delta))
            .await
            .map_err(Self::map_error)
    }

    /// Replaces a line's notes.
    #[instrument(skip(self, notes))]
    pub async fn set_notes(&self, id: CartLineId, notes: &str) -> Result<CartLine, CartError> {
        debug!("Sending request");
        let update = CartLineUpdate {
            notes: Some(notes.to_string()),
        };
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Empties the cart and deletes its snapshot.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        debug!("Sending request");
        self.inner.clear().await.map_err(Self::map_error)
    }

    /// All lines, in the order they were added.
    pub async fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        self.list().await
    }

    pub async fn cart(&self) -> Result<Cart, CartError> {
        self.lines().await.map(Cart::from)
    }

    pub async fn total_count(&self) -> Result<u32, CartError> {
        Ok(self.cart().await?.total_count())
    }

    pub async fn total_price(&self) -> Result<Money, CartError> {
        Ok(self.cart().await?.total_price())
    }
}
