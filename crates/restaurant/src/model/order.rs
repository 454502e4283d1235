/// Orders as they are stored and listed.
///
/// # Actor Framework
/// [`StoredOrder`] implements [`ActorEntity`](resource_actor::ActorEntity) (see
/// [`order_actor`](crate::order_actor)), so it is owned by a
/// [`ResourceActor`](resource_actor::ResourceActor) keyed by [`StoredOrder::id`].
use crate::model::{CartItem, OrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Table,
    Delivery,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Table => f.write_str("table"),
            OrderType::Delivery => f.write_str("delivery"),
        }
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OrderType::Table),
            "delivery" => Ok(OrderType::Delivery),
            other => Err(format!("unknown order type: {other}")),
        }
    }
}

/// Where the order goes. Serialized with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OrderInfo {
    #[serde(rename_all = "camelCase")]
    Table { table_number: String },
    Delivery {
        name: String,
        phone: String,
        address: String,
    },
}

impl OrderInfo {
    pub fn table(table_number: impl Into<String>) -> Self {
        OrderInfo::Table {
            table_number: table_number.into(),
        }
    }

    pub fn delivery(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        OrderInfo::Delivery {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            OrderInfo::Table { .. } => OrderType::Table,
            OrderInfo::Delivery { .. } => OrderType::Delivery,
        }
    }

    /// Name of the first blank required field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            OrderInfo::Table { table_number } if table_number.trim().is_empty() => {
                Some("tableNumber")
            }
            OrderInfo::Delivery { name, .. } if name.trim().is_empty() => Some("name"),
            OrderInfo::Delivery { phone, .. } if phone.trim().is_empty() => Some("phone"),
            OrderInfo::Delivery { address, .. } if address.trim().is_empty() => Some("address"),
            _ => None,
        }
    }
}

/// Payload for placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub order_info: OrderInfo,
    pub items: Vec<CartItem>,
    pub total: f64,
}

/// An order in the store.
///
/// The JSON form keeps the delivery details at the top level next to `type`:
///
/// ```json
/// { "id": "order_1760630400000_9f0c2a4b1e7d3356", "createdAt": "2026-10-16T16:00:00Z",
///   "type": "table", "tableNumber": "12", "items": [], "total": 1250.0, "status": "received" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub info: OrderInfo,
    pub items: Vec<CartItem>,
    pub total: f64,
    pub status: OrderStatus,
}

impl StoredOrder {
    pub fn order_type(&self) -> OrderType {
        self.info.order_type()
    }
}

/// `List` criteria. Empty fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub order_type: Option<OrderType>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_type(order_type: OrderType) -> Self {
        Self {
            order_type: Some(order_type),
            status: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn accepts(&self, order: &StoredOrder) -> bool {
        self.order_type.map_or(true, |t| order.order_type() == t)
            && self.status.map_or(true, |s| order.status == s)
    }
}

/// Dashboard figures for the orders placed since a cut-off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    /// Counted over every order, not only those after the cut-off.
    pub pending_orders: usize,
}

impl OrderStats {
    pub fn compute(orders: &[StoredOrder], since: DateTime<Utc>) -> Self {
        let recent: Vec<&StoredOrder> = orders.iter().filter(|o| o.created_at >= since).collect();
        let total_revenue: f64 = recent.iter().map(|o| o.total).sum();
        let average_order_value = if recent.is_empty() {
            0.0
        } else {
            total_revenue / recent.len() as f64
        };
        Self {
            total_orders: recent.len(),
            total_revenue,
            average_order_value,
            pending_orders: orders.iter().filter(|o| o.status.is_pending()).count(),
        }
    }
}

/// `order_<unix millis>_<16 hex chars>`.
pub fn generate_order_id() -> String {
    let random = uuid::Uuid::new_v4();
    format!(
        "order_{}_{}",
        Utc::now().timestamp_millis(),
        hex::encode(&random.as_bytes()[..8])
    )
}
