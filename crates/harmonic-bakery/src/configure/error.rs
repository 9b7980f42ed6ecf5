use crate::cart_actor::CartError;
use thiserror::Error;

/// Errors raised while configuring an item.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("No item is being configured")]
    Closed,

    #[error("{}", super::OPTION_REQUIRED)]
    MissingOption,

    #[error(transparent)]
    Cart(#[from] CartError),
}
