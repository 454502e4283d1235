//! # Order Client
//!
//! Provides a high-level API for interacting with the order actor.
//! It wraps a `ResourceClient<StoredOrder>` and maps framework errors to [`OrderError`].
use crate::model::{OrderCreate, OrderFilter, OrderStats, OrderStatus, StatusAction, StoredOrder};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<StoredOrder>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<StoredOrder>) -> Self {
        Self { inner }
    }

    /// Stores a new order at `received` and returns it with its id and timestamp.
    #[instrument(
        skip(self, params),
        fields(order_type = %params.order_info.order_type(), items = params.items.len())
    )]
    pub async fn place_order(&self, params: OrderCreate) -> Result<StoredOrder, OrderError> {
        debug!("Sending request");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(id = %order.id, total = order.total, "Order placed");
        Ok(order)
    }

    /// Sets the status without checking the transition.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: String,
        status: OrderStatus,
    ) -> Result<StoredOrder, OrderError> {
        debug!("Sending request");
        self.inner.update(id, status).await.map_err(Self::map_error)
    }

    /// Applies a staff action. Fails with `InvalidTransition` if it is not offered now.
    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        id: String,
        action: StatusAction,
    ) -> Result<StoredOrder, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Advance(action))
            .await
            .map_err(Self::map_error)
    }

    /// Dashboard figures for orders placed since `since`.
    #[instrument(skip(self))]
    pub async fn stats(&self, since: DateTime<Utc>) -> Result<OrderStats, OrderError> {
        let orders = self.list(OrderFilter::all()).await?;
        Ok(OrderStats::compute(&orders, since))
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

#[async_trait]
impl ActorClient<StoredOrder> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<StoredOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}
