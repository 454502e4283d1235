//! # Restaurant demo
//!
//! Runs one service day in miniature against the in-memory stores:
//!
//! 1. Start the [`RestaurantSystem`] from `RESTAURANT_CONFIG` (or defaults).
//! 2. Configure the admin password and log in.
//! 3. Place a table and a delivery order through checkout.
//! 4. Move both through the kitchen while a staff view follows the order feed.
//!
//! ```bash
//! RUST_LOG=info cargo run -p restaurant
//! ```

use http::Method;
use resource_actor::tracing::setup_tracing;
use restaurant::api::ApiRequest;
use restaurant::config::RestaurantConfig;
use restaurant::feed::OrderEvent;
use restaurant::lifecycle::RestaurantSystem;
use restaurant::model::{OrderInfo, OrderType, StatusAction};
use serde_json::json;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = RestaurantConfig::load().map_err(|e| e.to_string())?;
    let system = RestaurantSystem::new(config).map_err(|e| e.to_string())?;
    let api = system.api();

    // Staff view: follows the feed instead of polling the store
    let mut events = system.subscribe();
    let staff_view = tokio::spawn(
        async move {
            while let Ok(event) = events.recv().await {
                match event {
                    OrderEvent::Placed { order } => info!(
                        id = %order.id,
                        order_type = %order.order_type(),
                        total = order.total,
                        "New order"
                    ),
                    OrderEvent::StatusChanged { id, to, .. } => {
                        info!(%id, status = to.label(), "Order updated")
                    }
                    OrderEvent::Deleted { id } => info!(%id, "Order removed"),
                }
            }
        }
        .instrument(tracing::info_span!("staff_view")),
    );

    // Admin setup and login
    let credentials = json!({ "password": "cuisine!" });
    let setup = api
        .handle(ApiRequest::new(Method::POST, "/api/admin/setup").with_body(credentials.clone()))
        .await;
    info!(status = setup.status.as_u16(), "Admin setup");

    let login = api
        .handle(ApiRequest::new(Method::POST, "/api/admin/login").with_body(credentials))
        .await;
    let token = login.body["token"]
        .as_str()
        .ok_or("login did not return a token")?
        .to_string();

    // Customers check out
    let mut table = system.checkout(OrderInfo::table("12"));
    system
        .add_to_cart(&mut table, "classica", 2, Some("Large"), &[])
        .map_err(|e| e.to_string())?;
    system
        .add_to_cart(&mut table, "tiramisu", 2, None, &[])
        .map_err(|e| e.to_string())?;
    if let Err(e) = table.apply_promo("bienvenue10") {
        warn!(error = %e, "Promo code rejected");
    }

    let address = OrderInfo::delivery("Léa Martin", "0612345678", "4 quai des Brumes");
    let mut delivery = system.checkout(address);
    system
        .add_to_cart(&mut delivery, "smash", 1, None, &["Bacon"])
        .map_err(|e| e.to_string())?;
    system
        .add_to_cart(&mut delivery, "frites", 1, None, &[])
        .map_err(|e| e.to_string())?;

    let mut placed = Vec::new();
    for checkout in [&table, &delivery] {
        let summary = checkout.summary();
        info!(
            subtotal = summary.subtotal,
            delivery_fee = summary.delivery_fee,
            discount = summary.discount,
            total = summary.total,
            "Checkout summary"
        );
        let request = checkout.order_request().map_err(|e| e.to_string())?;
        let body = serde_json::to_value(&request).map_err(|e| e.to_string())?;
        let response = api
            .handle(ApiRequest::new(Method::POST, "/api/orders").with_body(body))
            .await;
        let id = response.body["id"]
            .as_str()
            .ok_or("order was not created")?
            .to_string();
        placed.push((id, checkout.order_info.order_type()));
    }

    // Kitchen
    for (id, order_type) in &placed {
        let last = match order_type {
            OrderType::Table => StatusAction::Serve,
            OrderType::Delivery => StatusAction::Deliver,
        };
        for action in [StatusAction::Accept, StatusAction::Start, StatusAction::Ready, last] {
            let response = api
                .handle(
                    ApiRequest::new(Method::POST, "/api/orders/advance")
                        .with_bearer(&token)
                        .with_body(json!({ "id": id, "action": action })),
                )
                .await;
            if !response.status.is_success() {
                warn!(%id, %action, body = %response.body, "Advance refused");
            }
        }
    }

    let stats = api
        .handle(ApiRequest::new(Method::GET, "/api/orders/stats").with_bearer(&token))
        .await;
    info!(stats = %stats.body, "End of service");

    api.handle(ApiRequest::new(Method::POST, "/api/admin/logout").with_bearer(&token))
        .await;

    let health = system.health().await;
    info!(ok = health.ok, "Health check");

    drop(api);
    system.shutdown().await.map_err(|e| e.to_string())?;
    // The feed closes once the order actor is gone
    let _ = staff_view.await;

    info!("Demo completed successfully");
    Ok(())
}
