//! # Order Validation & Submission
//!
//! From a filled-in form to an order in the bakery's inbox:
//!
//! 1. [`OrderForm`] collects name, email, fulfillment, address and pickup time, and answers the
//!    questions the form view asks ([`OrderForm::pickup_warning`], [`OrderForm::submit_enabled`]).
//! 2. [`ReadyOrder::prepare`] checks the form against the cart and the [`PickupPolicy`]. It is the
//!    only way to build a [`ReadyOrder`].
//! 3. [`OrderSubmitter::submit`] turns the order into a [`FormPayload`], hands it to a
//!    [`FormCollaborator`], and clears the cart once the collaborator accepts it. Only one
//!    submission is outstanding at a time.

mod collaborator;
mod error;
mod form;
mod pickup;
mod submit;

pub use collaborator::{FormCollaborator, FormspreeCollaborator, DEFAULT_FORM_ENDPOINT};
pub use error::{DeliveryError, OrderError};
pub use form::{
    parse_pickup_time, Fulfillment, OrderForm, ReadyOrder, DELIVERY_NOTE, PICKUP_TIME_FORMAT,
};
pub use pickup::{is_pickup_time_valid, PickupPolicy, DEFAULT_LEAD_HOURS};
pub use submit::{
    Confirmation, FormPayload, OrderSubmitter, CONFIRMATION_MESSAGE, CONFIRMATION_TITLE,
};
