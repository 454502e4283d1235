//! # Order Feed
//!
//! Staff views subscribe to [`OrderFeed`] to hear about new orders and status changes as
//! they happen. The order actor publishes from its hooks, so events arrive in the order
//! the store applied them.
//!
//! The feed is a `tokio::sync::broadcast` channel: a subscriber that falls more than
//! `feed_capacity` events behind gets `RecvError::Lagged` and should re-list the store.

use crate::model::{OrderStatus, StoredOrder};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum OrderEvent {
    Placed {
        order: StoredOrder,
    },
    StatusChanged {
        id: String,
        from: OrderStatus,
        to: OrderStatus,
    },
    Deleted {
        id: String,
    },
}

impl OrderEvent {
    pub fn order_id(&self) -> &str {
        match self {
            OrderEvent::Placed { order } => &order.id,
            OrderEvent::StatusChanged { id, .. } | OrderEvent::Deleted { id } => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderFeed {
    sender: broadcast::Sender<OrderEvent>,
}

impl OrderFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Sends `event` to current subscribers and returns how many there were.
    pub fn publish(&self, event: OrderEvent) -> usize {
        let id = event.order_id().to_string();
        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(%id, receivers, "Order event published");
                receivers
            }
            Err(_) => {
                debug!(%id, "Order event dropped, no subscribers");
                0
            }
        }
    }
}
