use crate::cart_actor;
use crate::clients::CartClient;
use crate::config::StorefrontConfig;
use crate::configure::ConfigurationFlow;
use crate::model::Menu;
use crate::order::{FormCollaborator, FormspreeCollaborator, OrderSubmitter, PickupPolicy};
use bakery_actor::{FileSnapshotStore, SnapshotStore};
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The running storefront: the menu, the cart actor and the means to configure items and send
/// orders.
///
/// # Example
///
/// ```rust
/// use bakery_actor::MemorySnapshotStore;
/// use harmonic_bakery::config::StorefrontConfig;
/// use harmonic_bakery::lifecycle::Storefront;
/// use harmonic_bakery::order::FormspreeCollaborator;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let storefront = Storefront::with_parts(
///         StorefrontConfig::default(),
///         Arc::new(MemorySnapshotStore::new()),
///         Arc::new(FormspreeCollaborator::default()),
///     );
///
///     let rolls = storefront.menu.find("cinnamon").unwrap();
///     storefront.cart_client.add_line(rolls, "", 1, "").await.unwrap();
///     assert_eq!(storefront.cart_client.total_count().await.unwrap(), 1);
///
///     storefront.shutdown().await.unwrap();
/// }
/// ```
pub struct Storefront {
    /// Client for the cart actor
    pub cart_client: CartClient,

    /// The fixed catalog
    pub menu: Menu,

    config: StorefrontConfig,
    submitter: OrderSubmitter,

    /// Task handles of running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Starts the storefront with the cart persisted under `config.storage_dir` and orders sent
    /// to `config.form_endpoint`. Must be called inside a Tokio runtime.
    pub fn start(config: StorefrontConfig) -> Self {
        let snapshots = Arc::new(FileSnapshotStore::new(config.storage_dir.clone()));
        let collaborator = Arc::new(FormspreeCollaborator::new(config.form_endpoint.clone()));
        Self::with_parts(config, snapshots, collaborator)
    }

    /// Starts the storefront over the given snapshot store and form service.
    pub fn with_parts(
        config: StorefrontConfig,
        snapshots: Arc<dyn SnapshotStore>,
        collaborator: Arc<dyn FormCollaborator>,
    ) -> Self {
        let (cart_actor, cart_client) =
            cart_actor::new(config.mailbox_capacity, snapshots, &config.cart_key);
        let cart_handle = tokio::spawn(cart_actor.run(()));
        info!(cart_key = %config.cart_key, "Storefront started");

        let submitter = OrderSubmitter::new(cart_client.clone(), collaborator);
        Self {
            cart_client,
            menu: Menu::standard(),
            config,
            submitter,
            handles: vec![cart_handle],
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn pickup_policy(&self) -> PickupPolicy {
        self.config.pickup_policy()
    }

    /// A configuration overlay over this storefront's cart.
    pub fn configure(&self) -> ConfigurationFlow {
        ConfigurationFlow::new(self.cart_client.clone(), self.config.flow_delays())
    }

    /// The order submitter. Every clone shares the same in-flight guard.
    pub fn submitter(&self) -> OrderSubmitter {
        self.submitter.clone()
    }

    /// Gracefully shuts down the storefront.
    ///
    /// Drops the storefront's clients, then waits for the cart actor, which drains every request
    /// already sent. Returns an error if the actor task panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down storefront...");

        // Closing the channels is the shutdown signal
        drop(self.cart_client);
        drop(self.submitter);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
