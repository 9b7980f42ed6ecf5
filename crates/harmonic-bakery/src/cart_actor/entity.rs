//! [`ActorEntity`] implementation for [`CartLine`].
//!
//! This is where the line invariants live: an item with options only enters the cart with one of
//! its options chosen, and a batch count is never below 1, whether it comes from an add, an
//! adjustment, or a snapshot written by an older session.

use super::actions::CartLineAction;
use super::error::CartError;
use crate::model::{CartLine, CartLineCreate, CartLineId, CartLineUpdate};
use async_trait::async_trait;
use bakery_actor::ActorEntity;

#[async_trait]
impl ActorEntity for CartLine {
    type Id = CartLineId;
    type Create = CartLineCreate;
    type Update = CartLineUpdate;
    type Action = CartLineAction;
    type ActionResult = u32;
    type Context = ();
    type Error = CartError;

    fn id(&self) -> &CartLineId {
        &self.cart_id
    }

    /// Builds a line from the configured item.
    ///
    /// # Errors
    /// - [`CartError::MissingOption`] when the item has options and `option` is empty
    /// - [`CartError::UnknownOption`] when `option` is not one of the item's options (any
    ///   non-empty option on an item without options is unknown)
    fn from_create_params(id: CartLineId, params: CartLineCreate) -> Result<Self, CartError> {
        let CartLineCreate {
            item,
            option,
            batches,
            notes,
        } = params;

        if item.has_options() && option.is_empty() {
            return Err(CartError::MissingOption {
                item: item.name.clone(),
            });
        }
        if !option.is_empty() && !item.accepts_option(&option) {
            return Err(CartError::UnknownOption {
                item: item.name.clone(),
                option,
            });
        }

        Ok(Self {
            cart_id: id,
            item,
            option,
            batches: batches.max(1),
            notes,
        })
    }

    async fn on_update(&mut self, update: CartLineUpdate, _ctx: &()) -> Result<(), CartError> {
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartLineAction,
        _ctx: &(),
    ) -> Result<u32, CartError> {
        match action {
            CartLineAction::AdjustQuantity(delta) => {
                let adjusted = i64::from(self.batches) + i64::from(delta);
                self.batches = u32::try_from(adjusted.max(1)).unwrap_or(u32::MAX);
                Ok(self.batches)
            }
        }
    }

    fn on_restore(mut self) -> Option<Self> {
        self.batches = self.batches.max(1);
        Some(self)
    }
}
