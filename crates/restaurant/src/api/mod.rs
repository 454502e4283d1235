//! # JSON Interface
//!
//! [`RestaurantApi`] maps transport-neutral [`ApiRequest`]s (method, path, query, bearer
//! token, JSON body) to [`ApiResponse`]s (status code, JSON body). An HTTP server only has
//! to convert its requests into `ApiRequest` and write the response back.
//!
//! | Method | Path | Auth | Success |
//! |--------|------|------|---------|
//! | GET | `/api/health` | | `{ok, orders, admin}` |
//! | POST | `/api/orders` | | 201, the stored order |
//! | GET | `/api/orders?type=&status=` | session | orders, newest first |
//! | GET | `/api/orders/stats` | session | today's figures |
//! | GET | `/api/orders/{id}` | session | the order |
//! | PATCH | `/api/orders` | session | `{id, status}` → the order |
//! | POST | `/api/orders/advance` | session | `{id, action}` → the order |
//! | DELETE | `/api/orders?id=` | session | `{success: true}` |
//! | GET | `/api/admin/setup` | | `{configured}` |
//! | POST | `/api/admin/setup` | | `{password}` → `{ok: true}` |
//! | POST | `/api/admin/login` | | `{password}` → `{ok, token, expiresAt}` |
//! | POST | `/api/admin/logout` | session | `{ok: true}` |
//! | POST | `/api/admin/password` | session | `{currentPassword, newPassword}` → `{ok: true}` |
//!
//! Errors are `{"error": message}` with the status from [`ApiError::status`].

pub mod error;

pub use error::ApiError;

use crate::clients::{AdminClient, OrderClient};
use crate::lifecycle::health;
use crate::model::{OrderCreate, OrderFilter, OrderStatus, OrderType, StatusAction};
use chrono::{Local, NaiveTime, TimeZone, Utc};
use http::{Method, StatusCode};
use resource_actor::ActorClient;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Raw `application/x-www-form-urlencoded` query string, without the `?`.
    pub query: String,
    pub bearer: Option<String>,
    pub body: Value,
}

impl ApiRequest {
    /// `target` may carry a query string (`/api/orders?type=table`).
    pub fn new(method: Method, target: &str) -> Self {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        Self {
            method,
            path: path.trim_end_matches('/').to_string(),
            query: query.to_string(),
            bearer: None,
            body: Value::Null,
        }
    }

    /// Decoded query parameters. A repeated key keeps its last value.
    pub fn query_params(&self) -> Result<HashMap<String, String>, ApiError> {
        serde_urlencoded::from_str(&self.query)
            .map_err(|e| ApiError::Validation(format!("Invalid query string: {e}")))
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

type ApiResult = Result<ApiResponse, ApiError>;

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Storage(e.to_string()))
}

fn str_field<'a>(body: &'a Value, name: &str) -> Option<&'a str> {
    body.get(name).and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Request handlers over the order and admin clients.
#[derive(Clone)]
pub struct RestaurantApi {
    orders: OrderClient,
    admin: AdminClient,
}

impl RestaurantApi {
    pub fn new(orders: OrderClient, admin: AdminClient) -> Self {
        Self { orders, admin }
    }

    /// Routes a request. Never fails: errors become error responses.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        let result = self.route(&request).await;
        match result {
            Ok(response) => {
                info!(status = response.status.as_u16(), "Request handled");
                response
            }
            Err(e) => e.into_response(),
        }
    }

    async fn route(&self, req: &ApiRequest) -> ApiResult {
        let token = req.bearer.as_deref();
        let query = req.query_params()?;
        match (req.path.as_str(), req.method.as_str()) {
            ("/api/health", "GET") => self.health().await,

            ("/api/orders", "POST") => self.create_order(&req.body).await,
            ("/api/orders", "GET") => {
                let type_param = query.get("type").map(String::as_str);
                let status_param = query.get("status").map(String::as_str);
                self.list_orders(token, type_param, status_param).await
            }
            ("/api/orders", "PATCH") => self.update_order_status(token, &req.body).await,
            ("/api/orders", "DELETE") => {
                self.delete_order(token, query.get("id").map(String::as_str))
                    .await
            }
            ("/api/orders/advance", "POST") => self.advance_order(token, &req.body).await,
            ("/api/orders/stats", "GET") => self.order_stats(token).await,

            ("/api/admin/setup", "GET") => self.admin_setup_status().await,
            ("/api/admin/setup", "POST") => self.admin_setup(&req.body).await,
            ("/api/admin/login", "POST") => self.admin_login(&req.body).await,
            ("/api/admin/logout", "POST") => self.admin_logout(token).await,
            ("/api/admin/password", "POST") => {
                self.admin_change_password(token, &req.body).await
            }

            (path, _) if Self::is_known_path(path) => Err(ApiError::MethodNotAllowed),
            (path, method) => match path.strip_prefix("/api/orders/") {
                Some(id) if !id.contains('/') && method == "GET" => {
                    self.get_order(token, id).await
                }
                Some(id) if !id.contains('/') => Err(ApiError::MethodNotAllowed),
                _ => Err(ApiError::NotFound("Not found".into())),
            },
        }
    }

    fn is_known_path(path: &str) -> bool {
        matches!(
            path,
            "/api/health"
                | "/api/orders"
                | "/api/orders/advance"
                | "/api/orders/stats"
                | "/api/admin/setup"
                | "/api/admin/login"
                | "/api/admin/logout"
                | "/api/admin/password"
        )
    }

    async fn require_session(&self, token: Option<&str>) -> Result<(), ApiError> {
        let token = token.ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;
        self.admin.validate_session(token).await?;
        Ok(())
    }

    pub async fn health(&self) -> ApiResult {
        let report = health::check(&self.orders, &self.admin).await;
        let status = if report.ok {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Ok(ApiResponse::new(status, to_json(&report)?))
    }

    pub async fn create_order(&self, body: &Value) -> ApiResult {
        let params: OrderCreate = serde_json::from_value(body.clone())
            .map_err(|_| ApiError::Validation("Invalid payload".into()))?;
        let order = self.orders.place_order(params).await?;
        Ok(ApiResponse::new(StatusCode::CREATED, to_json(&order)?))
    }

    pub async fn list_orders(
        &self,
        token: Option<&str>,
        type_param: Option<&str>,
        status_param: Option<&str>,
    ) -> ApiResult {
        self.require_session(token).await?;
        let mut filter = OrderFilter::all();
        if let Some(raw) = type_param.filter(|t| !t.is_empty()) {
            let order_type = raw.parse::<OrderType>().map_err(ApiError::Validation)?;
            filter.order_type = Some(order_type);
        }
        if let Some(raw) = status_param.filter(|s| !s.is_empty()) {
            let status = raw.parse::<OrderStatus>().map_err(ApiError::Validation)?;
            filter.status = Some(status);
        }
        let orders = self.orders.list(filter).await?;
        Ok(ApiResponse::ok(to_json(&orders)?))
    }

    pub async fn get_order(&self, token: Option<&str>, id: &str) -> ApiResult {
        self.require_session(token).await?;
        match self.orders.get(id.to_string()).await? {
            Some(order) => Ok(ApiResponse::ok(to_json(&order)?)),
            None => Err(ApiError::NotFound("Not found".into())),
        }
    }

    pub async fn update_order_status(&self, token: Option<&str>, body: &Value) -> ApiResult {
        self.require_session(token).await?;
        let (Some(id), Some(status)) = (str_field(body, "id"), str_field(body, "status")) else {
            return Err(ApiError::Validation("id and status required".into()));
        };
        let status = status.parse::<OrderStatus>().map_err(ApiError::Validation)?;
        let order = self.orders.update_status(id.to_string(), status).await?;
        Ok(ApiResponse::ok(to_json(&order)?))
    }

    pub async fn advance_order(&self, token: Option<&str>, body: &Value) -> ApiResult {
        self.require_session(token).await?;
        let (Some(id), Some(action)) = (str_field(body, "id"), body.get("action")) else {
            return Err(ApiError::Validation("id and action required".into()));
        };
        let action: StatusAction = serde_json::from_value(action.clone())
            .map_err(|_| ApiError::Validation("unknown action".into()))?;
        let order = self.orders.advance(id.to_string(), action).await?;
        Ok(ApiResponse::ok(to_json(&order)?))
    }

    pub async fn delete_order(&self, token: Option<&str>, id: Option<&str>) -> ApiResult {
        self.require_session(token).await?;
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Validation("id required".into()))?;
        self.orders.delete(id.to_string()).await?;
        Ok(ApiResponse::ok(json!({ "success": true })))
    }

    /// Figures for orders placed since local midnight.
    pub async fn order_stats(&self, token: Option<&str>) -> ApiResult {
        self.require_session(token).await?;
        let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);
        let since = Local
            .from_local_datetime(&midnight)
            .earliest()
            .map_or_else(Utc::now, |t| t.with_timezone(&Utc));
        let stats = self.orders.stats(since).await?;
        Ok(ApiResponse::ok(to_json(&stats)?))
    }

    pub async fn admin_setup_status(&self) -> ApiResult {
        let configured = self.admin.is_configured().await?;
        Ok(ApiResponse::ok(json!({ "configured": configured })))
    }

    pub async fn admin_setup(&self, body: &Value) -> ApiResult {
        if self.admin.is_configured().await? {
            return Err(ApiError::Conflict("Already configured".into()));
        }
        let password = body
            .get("password")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Validation("Password too short".into()))?;
        self.admin.setup(password).await?;
        Ok(ApiResponse::ok(json!({ "ok": true })))
    }

    pub async fn admin_login(&self, body: &Value) -> ApiResult {
        let password = body
            .get("password")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Validation("Invalid payload".into()))?;
        let session = self.admin.login(password).await?;
        Ok(ApiResponse::ok(json!({
            "ok": true,
            "token": session.token,
            "expiresAt": session.expires_at,
        })))
    }

    pub async fn admin_logout(&self, token: Option<&str>) -> ApiResult {
        let token = token.ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;
        self.admin.logout(token).await?;
        Ok(ApiResponse::ok(json!({ "ok": true })))
    }

    pub async fn admin_change_password(&self, token: Option<&str>, body: &Value) -> ApiResult {
        let token = token.ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;
        let (Some(current), Some(new_password)) = (
            body.get("currentPassword").and_then(Value::as_str),
            body.get("newPassword").and_then(Value::as_str),
        ) else {
            return Err(ApiError::Validation("Invalid payload".into()));
        };
        self.admin.change_password(token, current, new_password).await?;
        Ok(ApiResponse::ok(json!({ "ok": true })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_target_splits_query() {
        let req = ApiRequest::new(Method::GET, "/api/orders/?type=table&status=ready&flag");
        assert_eq!(req.path, "/api/orders");
        let query = req.query_params().unwrap();
        assert_eq!(query.get("type").map(String::as_str), Some("table"));
        assert_eq!(query.get("status").map(String::as_str), Some("ready"));
        assert_eq!(query.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn query_values_are_percent_decoded() {
        let req = ApiRequest::new(Method::DELETE, "/api/orders?id=order%5F1%2Bx&note=two+words");
        let query = req.query_params().unwrap();
        assert_eq!(query.get("id").map(String::as_str), Some("order_1+x"));
        assert_eq!(query.get("note").map(String::as_str), Some("two words"));
        assert!(ApiRequest::new(Method::GET, "/api/orders").query_params().unwrap().is_empty());
    }

    #[test]
    fn known_paths() {
        assert!(RestaurantApi::is_known_path("/api/admin/login"));
        assert!(!RestaurantApi::is_known_path("/api/menu"));
    }
}
