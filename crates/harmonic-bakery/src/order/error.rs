//! Error types for order validation and submission.

use crate::cart_actor::CartError;
use thiserror::Error;

/// Why an order could not be prepared or submitted.
///
/// The first group are validation failures raised by
/// [`ReadyOrder::prepare`](super::ReadyOrder::prepare); they correspond to the submit control
/// being disabled.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("The cart is empty")]
    EmptyCart,

    #[error("A pickup time is required")]
    MissingPickupTime,

    #[error("Must be at least {lead_hours} hours in advance.")]
    PickupTooSoon { lead_hours: i64 },

    #[error("Invalid pickup time {0:?}, expected YYYY-MM-DDTHH:MM")]
    InvalidPickupTime(String),

    #[error("A name is required")]
    MissingName,

    #[error("Invalid email address: {0:?}")]
    InvalidEmail(String),

    /// Another submission has not finished yet.
    #[error("An order is already being submitted")]
    InFlight,

    #[error("Could not encode the order: {0}")]
    Encode(#[from] serde_json::Error),

    /// The form service failed or refused the order. The cart is left as it was.
    #[error("The order could not be sent: {0}")]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Failures reported by a [`FormCollaborator`](super::FormCollaborator).
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("form service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("form service answered {status}: {body}")]
    Rejected { status: u16, body: String },
}
