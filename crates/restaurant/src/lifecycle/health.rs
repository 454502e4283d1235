//! Liveness of the store actors.

use crate::clients::{AdminClient, OrderClient};
use resource_actor::ActorClient;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    pub orders: bool,
    pub admin: bool,
}

/// Sends one read to each actor; an actor is healthy if it answers.
pub async fn check(orders: &OrderClient, admin: &AdminClient) -> HealthReport {
    let orders_ok = match orders.get(String::new()).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Order actor unreachable");
            false
        }
    };
    let admin_ok = match admin.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Admin actors unreachable");
            false
        }
    };

    HealthReport {
        ok: orders_ok && admin_ok,
        orders: orders_ok,
        admin: admin_ok,
    }
}
