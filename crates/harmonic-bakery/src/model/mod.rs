//! Plain data: the menu, cart lines, sections and storefront copy.
//!
//! Nothing in here talks to an actor; [`CartLine`] is handed to one by
//! [`cart_actor`](crate::cart_actor).

pub mod cart;
pub mod contact;
pub mod menu;
pub mod section;

pub use cart::*;
pub use contact::*;
pub use menu::*;
pub use section::*;
