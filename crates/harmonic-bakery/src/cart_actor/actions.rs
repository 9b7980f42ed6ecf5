//! Custom actions for the cart actor.
//!
//! Handled by [`ActorEntity::handle_action`](bakery_actor::ActorEntity::handle_action) on
//! [`CartLine`](crate::model::CartLine).

/// Operations on a single line beyond create/update/delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLineAction {
    /// Changes the batch count by the given delta. The count never drops below 1; the action
    /// returns the new count.
    AdjustQuantity(i32),
}
