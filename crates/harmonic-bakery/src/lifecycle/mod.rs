//! # Storefront Lifecycle
//!
//! Individual pieces (the cart actor, the configuration flow, the order submitter) are simple;
//! wiring them to the same cart and shutting them down cleanly is what this module does.
//!
//! ## The Storefront Pattern
//!
//! [`Storefront`] is the conductor:
//!
//! 1. **Durability** - picks the snapshot store (a directory of JSON files by default)
//! 2. **Actor Creation** - creates the cart actor over that store and spawns it
//! 3. **Wiring** - hands clones of the cart client to every flow and submitter it creates
//! 4. **Graceful Shutdown** - drops its clients and waits for the actor to finish
//!
//! ```rust,ignore
//! let storefront = Storefront::start(StorefrontConfig::resolve(None)?);
//!
//! let muffins = storefront.menu.find("muffins").unwrap().clone();
//! let mut flow = storefront.configure();
//! flow.open(&muffins);
//! flow.select_option("Blueberry")?;
//! flow.commit().await?;
//! drop(flow);
//!
//! storefront.shutdown().await?;
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the cart actor's channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor finishes** - every request sent before the close has been handled and persisted
//! 4. **Await completion** - the task handle is joined
//!
//! Flows and submitters hold their own cart client clones. Drop them before calling
//! [`Storefront::shutdown`], or it waits for them.

pub mod storefront;

pub use storefront::*;
