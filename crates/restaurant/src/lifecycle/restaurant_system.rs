use crate::admin_actor;
use crate::api::RestaurantApi;
use crate::clients::{AdminClient, OrderClient};
use crate::config::{ConfigError, RestaurantConfig};
use crate::feed::{OrderEvent, OrderFeed};
use crate::lifecycle::health::{self, HealthReport};
use crate::model::{CartItem, Menu, OrderInfo};
use crate::order_actor;
use crate::pricing::{Checkout, PricingCalculator};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Actor task failed: {0}")]
    TaskFailed(String),
}

/// The running restaurant: store actors, their clients and the catalog.
///
/// # Architecture
///
/// - **Order actor**: the order store; publishes on the [`OrderFeed`] given as its context
/// - **Credential actor**: the single admin password hash
/// - **Session actor**: admin sessions, swept periodically for expired entries
///
/// # Example
///
/// ```rust
/// use restaurant::config::RestaurantConfig;
/// use restaurant::lifecycle::RestaurantSystem;
/// use restaurant::model::OrderInfo;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = RestaurantSystem::new(RestaurantConfig::default())?;
///
///     let mut checkout = system.checkout(OrderInfo::table("5"));
///     system.add_to_cart(&mut checkout, "frites", 2, None, &[])?;
///     let order = system.order_client.place_order(checkout.order_request()?).await?;
///     assert_eq!(order.total, 400.0);
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct RestaurantSystem {
    pub order_client: OrderClient,
    pub admin_client: AdminClient,
    pub feed: OrderFeed,
    pub menu: Arc<Menu>,
    pub pricing: PricingCalculator,
    handles: Vec<JoinHandle<()>>,
    sweeper: JoinHandle<()>,
}

impl RestaurantSystem {
    /// Starts every actor with the sample menu. Must be called inside a Tokio runtime.
    pub fn new(config: RestaurantConfig) -> Result<Self, LifecycleError> {
        Self::with_menu(config, Menu::sample())
    }

    /// Validates `config` before any actor is spawned.
    pub fn with_menu(config: RestaurantConfig, menu: Menu) -> Result<Self, LifecycleError> {
        config.validate()?;
        let buffer_size = config.store.buffer_size;
        let feed = OrderFeed::new(config.store.feed_capacity);

        let (order_actor, order_resource_client) = order_actor::new(buffer_size);
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run(feed.clone()));

        let (credential_actor, credentials) = admin_actor::new_credentials(buffer_size);
        let credential_handle = tokio::spawn(credential_actor.run(()));

        let (session_actor, sessions) = admin_actor::new_sessions(buffer_size);
        let session_handle = tokio::spawn(session_actor.run(()));

        let purge_every = Duration::from_secs(config.admin.session_purge_interval_secs);
        let admin_client = AdminClient::new(credentials, sessions, config.admin);
        let sweeper = tokio::spawn(sweep_sessions(admin_client.clone(), purge_every));

        info!(
            menu_items = menu.items().len(),
            promo_codes = config.pricing.promo_codes.len(),
            "Restaurant system started"
        );

        Ok(Self {
            order_client,
            admin_client,
            feed,
            menu: Arc::new(menu),
            pricing: PricingCalculator::new(config.pricing),
            handles: vec![order_handle, credential_handle, session_handle],
            sweeper,
        })
    }

    /// The JSON interface over this system's clients.
    pub fn api(&self) -> RestaurantApi {
        RestaurantApi::new(self.order_client.clone(), self.admin_client.clone())
    }

    /// A new empty checkout priced with the configured rules.
    pub fn checkout(&self, order_info: OrderInfo) -> Checkout {
        Checkout::new(self.pricing.clone(), order_info)
    }

    /// Adds a menu item to the checkout's cart.
    pub fn add_to_cart(
        &self,
        checkout: &mut Checkout,
        item_id: &str,
        quantity: u32,
        size: Option<&str>,
        extras: &[&str],
    ) -> Result<(), UnknownMenuItem> {
        let item = self
            .menu
            .find(item_id)
            .ok_or_else(|| UnknownMenuItem(item_id.to_string()))?;
        checkout.cart.add(CartItem::new(
            item.clone(),
            quantity,
            size.map(str::to_string),
            extras.iter().map(|e| e.to_string()).collect(),
        ));
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.feed.subscribe()
    }

    pub async fn health(&self) -> HealthReport {
        health::check(&self.order_client, &self.admin_client).await
    }

    /// Stops the session sweeper, drops the clients and waits for every actor to finish.
    ///
    /// Actors only stop once every clone of their client is gone, so [`RestaurantApi`]
    /// values obtained from [`api`](Self::api) must be dropped first.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down restaurant system");
        self.sweeper.abort();
        // The sweeper holds an AdminClient clone until its task is gone.
        let _ = self.sweeper.await;

        drop(self.order_client);
        drop(self.admin_client);

        join_actors(self.handles).await?;
        info!("Restaurant system shutdown complete");
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Unknown menu item: {0}")]
pub struct UnknownMenuItem(pub String);

/// Awaits every handle, then reports the first failure.
async fn join_actors(handles: Vec<JoinHandle<()>>) -> Result<(), LifecycleError> {
    let mut first_failure = None;
    for handle in handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Actor task failed");
            first_failure.get_or_insert(LifecycleError::TaskFailed(e.to_string()));
        }
    }
    first_failure.map_or(Ok(()), Err)
}

async fn sweep_sessions(admin: AdminClient, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    // The first tick completes immediately.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if let Err(e) = admin.purge_expired_sessions().await {
            warn!(error = %e, "Session sweep failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn join_waits_for_every_actor_after_a_failure() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let handles = vec![
            tokio::spawn(async { panic!("actor crashed"); }),
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                flag.store(true, Ordering::SeqCst);
            }),
        ];

        let result = join_actors(handles).await;
        assert!(matches!(result, Err(LifecycleError::TaskFailed(_))));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_spawning() {
        let mut config = RestaurantConfig::default();
        config.store.buffer_size = 0;
        assert!(matches!(
            RestaurantSystem::new(config),
            Err(LifecycleError::Config(ConfigError::Invalid(_)))
        ));
    }
}
