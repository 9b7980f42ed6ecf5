//! Error types for the cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The item declares flavor options and none was chosen.
    #[error("Please select a flavor option.")]
    MissingOption { item: String },

    /// The chosen option is not one the item offers.
    #[error("{item} does not come in {option:?}")]
    UnknownOption { item: String, option: String },

    /// No line with this cart id.
    #[error("Cart line not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
