//! Handing a [`ReadyOrder`] to the form service.

use super::collaborator::FormCollaborator;
use super::error::OrderError;
use super::form::{Fulfillment, ReadyOrder};
use crate::clients::CartClient;
use crate::model::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const CONFIRMATION_TITLE: &str = "Order Received!";
pub const CONFIRMATION_MESSAGE: &str = "A confirmation email has been sent.";

/// The fields sent to the form service. `order` is the whole cart as a JSON array, in the same
/// shape as the cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPayload {
    pub name: String,
    pub email: String,
    pub fulfillment: Fulfillment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub pickup: DateTime<Utc>,
    pub order: String,
}

impl FormPayload {
    pub fn from_order(order: &ReadyOrder) -> Result<Self, serde_json::Error> {
        let form = order.form();
        let address = match form.fulfillment {
            Fulfillment::Delivery => Some(form.address.clone()),
            Fulfillment::Pickup => None,
        };
        Ok(Self {
            name: form.name.clone(),
            email: form.email.clone(),
            fulfillment: form.fulfillment,
            address,
            pickup: order.pickup(),
            order: serde_json::to_string(order.cart().lines())?,
        })
    }
}

/// Acknowledgment shown after the form service accepted an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: &'static str,
    pub batches: u32,
    pub total: Money,
}

/// Sends orders, one at a time, and empties the cart once one is accepted.
#[derive(Clone)]
pub struct OrderSubmitter {
    cart: CartClient,
    collaborator: Arc<dyn FormCollaborator>,
    in_flight: Arc<AtomicBool>,
}

impl OrderSubmitter {
    pub fn new(cart: CartClient, collaborator: Arc<dyn FormCollaborator>) -> Self {
        Self {
            cart,
            collaborator,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a submission is outstanding (the submit control shows as busy).
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits `order`.
    ///
    /// On success the cart is cleared (which also deletes its snapshot). On failure the cart is
    /// left untouched and nothing is retried.
    ///
    /// # Errors
    /// - [`OrderError::InFlight`] while another submission from this submitter (or a clone) is
    ///   outstanding
    /// - [`OrderError::Delivery`] when the form service fails or refuses the order
    #[instrument(skip_all, fields(batches = order.cart().total_count()))]
    pub async fn submit(&self, order: ReadyOrder) -> Result<Confirmation, OrderError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(OrderError::InFlight)?;

        let payload = FormPayload::from_order(&order)?;
        if let Err(e) = self.collaborator.submit(&payload).await {
            warn!(error = %e, "Order not delivered, cart kept");
            return Err(e.into());
        }

        // The order is with the bakery now; a stale cart must not turn that into a failure
        if let Err(e) = self.cart.clear().await {
            error!(error = %e, "Order delivered but the cart could not be cleared");
        }
        info!(total = %order.cart().total_price(), "Order submitted");

        Ok(Confirmation {
            title: CONFIRMATION_TITLE,
            message: CONFIRMATION_MESSAGE,
            batches: order.cart().total_count(),
            total: order.cart().total_price(),
        })
    }
}

/// Holds the in-flight flag for the duration of one submission.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
