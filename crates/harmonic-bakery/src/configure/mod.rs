//! # Item Configuration Flow
//!
//! The overlay in which a menu item is configured before it goes into the cart: pick a flavor,
//! choose how many batches, leave a note, then commit or cancel.
//!
//! ## States
//!
//! ```text
//! Closed --open(item)--> Open(draft) --commit--> Open(draft, added) --auto-close--> Closed
//!                             \                                                  /
//!                              `------------------cancel------------------------'
//! ```
//!
//! Opening always starts from a fresh [`Draft`], so nothing chosen for one item leaks into the
//! next.
//!
//! ## Timers
//!
//! A successful commit starts two one-shot timers: the auto-close (about a second) that closes the
//! overlay and returns to the menu, and the added-signal timer (about ten seconds) that clears the
//! "Added!" marker if the overlay is still open. Timers are Tokio tasks owned by the flow. Opening,
//! cancelling, closing or dropping the flow aborts them, and their deliveries go through a channel
//! that is replaced on every commit, so a stale timer can never touch a later draft.
//!
//! The flow does not run the timers' effects on its own: the owner drives them with
//! [`ConfigurationFlow::next_timer`] or [`ConfigurationFlow::settle`].

mod error;
mod flow;

pub use error::FlowError;
pub use flow::{ConfigurationFlow, Draft, FlowDelays, FlowTimer};

/// Shown next to the option picker when committing without a flavor.
pub const OPTION_REQUIRED: &str = "Please select a flavor option.";
