//! Typed clients over the generic [`ResourceClient`](bakery_actor::ResourceClient).

pub mod cart_client;

pub use bakery_actor::ActorClient;
pub use cart_client::CartClient;
