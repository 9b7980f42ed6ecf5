//! The order form and the gate between it and submission.

use super::error::OrderError;
use super::pickup::PickupPolicy;
use crate::model::Cart;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Shown under the address field for delivery orders.
pub const DELIVERY_NOTE: &str = "We will contact you for a delivery quote.";

/// Input format of the pickup time, as entered in local time.
pub const PICKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fulfillment {
    #[default]
    Pickup,
    Delivery,
}

impl Display for Fulfillment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Fulfillment::Pickup => "Pickup",
            Fulfillment::Delivery => "Delivery",
        })
    }
}

/// What the customer filled in. Built fresh for every order, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    pub fulfillment: Fulfillment,
    /// Only used for [`Fulfillment::Delivery`].
    pub address: String,
    pub pickup_time: Option<DateTime<Utc>>,
}

impl OrderForm {
    pub fn pickup_warning(&self, now: DateTime<Utc>, policy: &PickupPolicy) -> Option<String> {
        policy.warning(self.pickup_time, now)
    }

    pub fn delivery_note(&self) -> Option<&'static str> {
        (self.fulfillment == Fulfillment::Delivery).then_some(DELIVERY_NOTE)
    }

    /// Whether the submit control is enabled: something in the cart and a valid pickup time.
    pub fn submit_enabled(&self, cart: &Cart, now: DateTime<Utc>, policy: &PickupPolicy) -> bool {
        !cart.is_empty() && policy.is_valid(self.pickup_time, now)
    }
}

/// An order that passed every check and may be handed to
/// [`OrderSubmitter::submit`](super::OrderSubmitter::submit).
///
/// [`ReadyOrder::prepare`] is the only constructor, so an order with an empty cart or a too-early
/// pickup time cannot reach the form service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyOrder {
    form: OrderForm,
    cart: Cart,
    pickup: DateTime<Utc>,
}

impl ReadyOrder {
    /// Validates `form` against `cart` at time `now`.
    ///
    /// Name and email are trimmed. The address is dropped for pickup orders.
    ///
    /// # Errors
    /// [`OrderError::EmptyCart`], [`OrderError::MissingPickupTime`],
    /// [`OrderError::PickupTooSoon`], [`OrderError::MissingName`] or
    /// [`OrderError::InvalidEmail`], checked in that order.
    pub fn prepare(
        mut form: OrderForm,
        cart: Cart,
        now: DateTime<Utc>,
        policy: &PickupPolicy,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let pickup = form.pickup_time.ok_or(OrderError::MissingPickupTime)?;
        if !policy.is_valid(Some(pickup), now) {
            return Err(OrderError::PickupTooSoon {
                lead_hours: policy.lead_hours(),
            });
        }

        form.name = form.name.trim().to_string();
        form.email = form.email.trim().to_string();
        if form.name.is_empty() {
            return Err(OrderError::MissingName);
        }
        if !is_valid_email(&form.email) {
            return Err(OrderError::InvalidEmail(form.email));
        }
        if form.fulfillment == Fulfillment::Pickup {
            form.address.clear();
        }

        Ok(Self { form, cart, pickup })
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn pickup(&self) -> DateTime<Utc> {
        self.pickup
    }
}

/// Parses a `YYYY-MM-DDTHH:MM` pickup time given in the local time zone.
pub fn parse_pickup_time(input: &str) -> Result<DateTime<Utc>, OrderError> {
    let invalid = || OrderError::InvalidPickupTime(input.to_string());
    let naive = NaiveDateTime::parse_from_str(input.trim(), PICKUP_TIME_FORMAT)
        .map_err(|_| invalid())?;
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(invalid)
}

/// The same check a browser applies to an email input: `local@domain`, no spaces.
fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
