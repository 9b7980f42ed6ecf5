//! # Cart Actor
//!
//! The cart store: a [`ResourceActor`] over [`CartLine`] entities, backed by a
//! [`SnapshotStore`] so the cart survives between sessions.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](bakery_actor::ActorEntity) implementation for [`CartLine`]
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartLineAction`] for quantity adjustment
//! - [`new()`] - Factory function that creates the actor and its [`CartClient`]
//!
//! ## Persistence
//!
//! The whole cart is one JSON array under a single key (`hb_cart` by default). It is read once
//! when the actor starts, rewritten after every successful mutation, and deleted by
//! [`CartClient::clear`]. A missing or malformed snapshot starts an empty cart.
//!
//! ## Usage
//!
//! ```rust
//! use bakery_actor::MemorySnapshotStore;
//! use harmonic_bakery::cart_actor;
//! use harmonic_bakery::model::Menu;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, cart) = cart_actor::new(32, Arc::new(MemorySnapshotStore::new()), "hb_cart");
//!     tokio::spawn(actor.run(()));
//!
//!     let menu = Menu::standard();
//!     let muffins = menu.find("muffins").unwrap();
//!     cart.add_line(muffins, "Blueberry", 2, "").await?;
//!
//!     assert_eq!(cart.total_count().await?, 2);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::model::{CartLine, CartLineId};
use bakery_actor::{ResourceActor, SnapshotStore};
use std::sync::Arc;

/// Creates the cart actor and its client. The actor restores `key` from `snapshots` when it
/// starts running.
pub fn new(
    mailbox_capacity: usize,
    snapshots: Arc<dyn SnapshotStore>,
    key: &str,
) -> (ResourceActor<CartLine>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_capacity, CartLineId::random);
    (
        actor.with_snapshot(snapshots, key),
        CartClient::new(generic_client),
    )
}
