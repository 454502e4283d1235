//! [`ActorEntity`] implementation for [`StoredOrder`].
//!
//! - Create validates the payload and starts the order at `received`.
//! - Update sets the status as given (no transition check, last write wins).
//! - [`OrderAction::Advance`] applies a staff action through the status machine.
//!
//! Every change is published on the [`OrderFeed`] injected as the actor's context.

use crate::feed::{OrderEvent, OrderFeed};
use crate::model::{OrderCreate, OrderFilter, OrderStatus, StatusAction, StoredOrder};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
pub enum OrderAction {
    Advance(StatusAction),
}

#[async_trait]
impl ActorEntity for StoredOrder {
    type Id = String;
    type Create = OrderCreate;
    type Update = OrderStatus;
    type Filter = OrderFilter;
    type Action = OrderAction;
    type ActionResult = StoredOrder;
    type Context = OrderFeed;
    type Error = OrderError;

    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if !params.total.is_finite() || params.total < 0.0 {
            return Err(OrderError::ValidationError(format!(
                "total must be a non-negative number, got {}",
                params.total
            )));
        }
        if let Some(field) = params.order_info.missing_field() {
            return Err(OrderError::ValidationError(format!("{field} is required")));
        }

        Ok(Self {
            id,
            created_at: Utc::now(),
            info: params.order_info,
            items: params.items,
            total: params.total,
            status: OrderStatus::Received,
        })
    }

    async fn on_create(&mut self, feed: &OrderFeed) -> Result<(), OrderError> {
        feed.publish(OrderEvent::Placed {
            order: self.clone(),
        });
        Ok(())
    }

    async fn on_update(&mut self, status: OrderStatus, feed: &OrderFeed) -> Result<(), OrderError> {
        let from = std::mem::replace(&mut self.status, status);
        feed.publish(OrderEvent::StatusChanged {
            id: self.id.clone(),
            from,
            to: status,
        });
        Ok(())
    }

    async fn on_delete(&self, feed: &OrderFeed) -> Result<(), OrderError> {
        feed.publish(OrderEvent::Deleted {
            id: self.id.clone(),
        });
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        feed: &OrderFeed,
    ) -> Result<StoredOrder, OrderError> {
        match action {
            OrderAction::Advance(step) => {
                let Some(next) = self.status.apply(step, self.order_type()) else {
                    return Err(OrderError::InvalidTransition {
                        id: self.id.clone(),
                        status: self.status,
                        action: step,
                    });
                };
                let from = std::mem::replace(&mut self.status, next);
                feed.publish(OrderEvent::StatusChanged {
                    id: self.id.clone(),
                    from,
                    to: next,
                });
                Ok(self.clone())
            }
        }
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.accepts(self)
    }

    /// Newest first.
    fn list_order(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| other.id.cmp(&self.id))
    }
}
