//! # Order Lifecycle
//!
//! ```text
//! received ──accept──▶ accepted ──start──▶ preparing ──ready──▶ ready ──serve───▶ served     (table)
//!     │                                                               └─deliver─▶ delivered  (delivery)
//!     └──cancel──▶ cancelled
//! ```
//!
//! Transitions only move forward. `cancel` is offered from `received` only.

use crate::model::OrderType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Received,
    Accepted,
    Preparing,
    Ready,
    Served,
    Delivered,
    Cancelled,
}

/// A staff action moving an order to its next status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Accept,
    Cancel,
    Start,
    Ready,
    Serve,
    Deliver,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Received,
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "received",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// French label shown to staff.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Reçue",
            OrderStatus::Accepted => "Acceptée",
            OrderStatus::Preparing => "En préparation",
            OrderStatus::Ready => "Prête",
            OrderStatus::Served => "Servie",
            OrderStatus::Delivered => "Livrée",
            OrderStatus::Cancelled => "Annulée",
        }
    }

    /// Still waiting on the kitchen.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            OrderStatus::Received | OrderStatus::Accepted | OrderStatus::Preparing
        )
    }

    /// No action leads out of this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Served | OrderStatus::Delivered | OrderStatus::Cancelled
        )
    }

    /// Actions staff may take on an order of `order_type` in this status.
    pub fn next_actions(&self, order_type: OrderType) -> &'static [StatusAction] {
        match (self, order_type) {
            (OrderStatus::Received, _) => &[StatusAction::Accept, StatusAction::Cancel],
            (OrderStatus::Accepted, _) => &[StatusAction::Start],
            (OrderStatus::Preparing, _) => &[StatusAction::Ready],
            (OrderStatus::Ready, OrderType::Table) => &[StatusAction::Serve],
            (OrderStatus::Ready, OrderType::Delivery) => &[StatusAction::Deliver],
            _ => &[],
        }
    }

    /// Status reached by applying `action`, or `None` if it is not offered now.
    pub fn apply(&self, action: StatusAction, order_type: OrderType) -> Option<OrderStatus> {
        if !self.next_actions(order_type).contains(&action) {
            return None;
        }
        Some(action.target())
    }
}

impl StatusAction {
    pub fn target(&self) -> OrderStatus {
        match self {
            StatusAction::Accept => OrderStatus::Accepted,
            StatusAction::Cancel => OrderStatus::Cancelled,
            StatusAction::Start => OrderStatus::Preparing,
            StatusAction::Ready => OrderStatus::Ready,
            StatusAction::Serve => OrderStatus::Served,
            StatusAction::Deliver => OrderStatus::Delivered,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown status: {s}"))
    }
}

impl fmt::Display for StatusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusAction::Accept => "accept",
            StatusAction::Cancel => "cancel",
            StatusAction::Start => "start",
            StatusAction::Ready => "ready",
            StatusAction::Serve => "serve",
            StatusAction::Deliver => "deliver",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(status: OrderStatus) -> u8 {
        match status {
            OrderStatus::Received => 0,
            OrderStatus::Accepted => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Ready => 3,
            OrderStatus::Served | OrderStatus::Delivered | OrderStatus::Cancelled => 4,
        }
    }

    #[test]
    fn every_transition_moves_forward() {
        for order_type in [OrderType::Table, OrderType::Delivery] {
            for status in OrderStatus::ALL {
                for action in status.next_actions(order_type) {
                    let next = status.apply(*action, order_type).unwrap();
                    assert!(rank(next) > rank(status), "{status} -> {next}");
                }
            }
        }
    }

    #[test]
    fn ready_branches_on_order_type() {
        let ready = OrderStatus::Ready;
        assert_eq!(
            ready.apply(StatusAction::Serve, OrderType::Table),
            Some(OrderStatus::Served)
        );
        assert_eq!(ready.apply(StatusAction::Serve, OrderType::Delivery), None);
        assert_eq!(
            ready.apply(StatusAction::Deliver, OrderType::Delivery),
            Some(OrderStatus::Delivered)
        );
    }

    #[test]
    fn cancel_only_from_received() {
        assert_eq!(
            OrderStatus::Received.apply(StatusAction::Cancel, OrderType::Table),
            Some(OrderStatus::Cancelled)
        );
        for status in OrderStatus::ALL.into_iter().skip(1) {
            assert_eq!(status.apply(StatusAction::Cancel, OrderType::Table), None);
        }
    }

    #[test]
    fn terminal_states_offer_nothing() {
        for status in [OrderStatus::Served, OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(status.is_terminal());
            assert!(status.next_actions(OrderType::Delivery).is_empty());
        }
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("preparing".parse::<OrderStatus>(), Ok(OrderStatus::Preparing));
        assert!("lost".parse::<OrderStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&StatusAction::Deliver).unwrap(),
            "\"deliver\""
        );
    }
}
