//! # Harmonic Bakery
//!
//! The storefront of a small family bakery: browse a fixed menu, configure an item (flavor,
//! batches, notes), collect it in a cart that survives between sessions, and send the order to
//! the bakery's form inbox.
//!
//! ## Modules
//!
//! - [`model`] - plain data: [`MenuItem`](model::MenuItem), [`CartLine`](model::CartLine),
//!   [`Cart`](model::Cart), sections and storefront copy
//! - [`cart_actor`] - the cart store, a [`bakery_actor::ResourceActor`] persisted after every change
//! - [`clients`] - [`CartClient`](clients::CartClient), the typed cart API
//! - [`configure`] - the item configuration overlay and its timers
//! - [`order`] - pickup-time rule, order form, submission to the form service
//! - [`config`] - settings from defaults, TOML and the environment
//! - [`lifecycle`] - [`Storefront`](lifecycle::Storefront), which wires it all together
//!
//! ## Testing
//!
//! See [`bakery_actor::mock`] for utilities to test client logic without spawning the actor.

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod configure;
pub mod lifecycle;
pub mod model;
pub mod order;
