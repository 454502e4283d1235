//! # Pricing & Checkout
//!
//! [`PricingCalculator`] turns cart lines into an [`OrderSummary`]:
//!
//! ```text
//! subtotal     = Σ line totals
//! taxes        = subtotal × tax_rate
//! delivery_fee = delivery_fee if delivery, else 0
//! discount     = max(automatic, promo)      never both
//! total        = max(0, subtotal + taxes + delivery_fee − discount)
//! ```
//!
//! The automatic discount applies from `discount_threshold` upwards (inclusive). Promo codes
//! come from configuration and are matched trimmed and upper-cased.
//!
//! [`Checkout`] is the customer-side state around it: the cart, where the order goes and
//! the applied promo code. Nothing is persisted until [`Checkout::order_request`] is sent
//! to the order store.

use crate::config::{PricingConfig, PromoCode};
use crate::model::{Cart, CartItem, OrderCreate, OrderInfo, OrderType};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Veuillez saisir un code promo")]
    EmptyPromoCode,
    #[error("Code promo invalide")]
    InvalidPromoCode(String),
    #[error("Le panier est vide")]
    EmptyCart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub taxes: f64,
    pub delivery_fee: f64,
    pub discount: f64,
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PricingCalculator {
    config: Arc<PricingConfig>,
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl PricingCalculator {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Looks up a code as typed by the customer.
    ///
    /// Returns the normalised code and its promo.
    pub fn validate_promo<'a>(
        &'a self,
        input: &str,
    ) -> Result<(String, &'a PromoCode), PricingError> {
        let code = input.trim().to_uppercase();
        if code.is_empty() {
            return Err(PricingError::EmptyPromoCode);
        }
        match self.config.promo_codes.get(&code) {
            Some(promo) => Ok((code, promo)),
            None => Err(PricingError::InvalidPromoCode(code)),
        }
    }

    pub fn delivery_fee(&self, order_type: OrderType) -> f64 {
        match order_type {
            OrderType::Delivery => self.config.delivery_fee,
            OrderType::Table => 0.0,
        }
    }

    /// Discount for `subtotal`: the larger of the automatic and the promo discount.
    ///
    /// A code missing from the catalog contributes nothing.
    pub fn discount(&self, subtotal: f64, promo_code: Option<&str>) -> f64 {
        let automatic = if subtotal >= self.config.discount_threshold {
            subtotal * self.config.discount_rate
        } else {
            0.0
        };
        let promo = promo_code
            .and_then(|code| self.config.promo_codes.get(code))
            .map_or(0.0, |promo| subtotal * promo.rate);
        automatic.max(promo)
    }

    pub fn summarize(
        &self,
        items: &[CartItem],
        order_type: OrderType,
        promo_code: Option<&str>,
    ) -> OrderSummary {
        let subtotal: f64 = items.iter().map(|line| line.total_price).sum();
        let taxes = subtotal * self.config.tax_rate;
        let delivery_fee = self.delivery_fee(order_type);
        let discount = self.discount(subtotal, promo_code);
        let total = (subtotal + taxes + delivery_fee - discount).max(0.0);

        OrderSummary {
            items: items.to_vec(),
            subtotal,
            taxes,
            delivery_fee,
            discount,
            total,
            promo_code: promo_code.map(str::to_string),
        }
    }
}

/// A customer's cart on its way to becoming an order.
#[derive(Debug, Clone)]
pub struct Checkout {
    calculator: PricingCalculator,
    pub cart: Cart,
    pub order_info: OrderInfo,
    applied_promo: Option<String>,
}

impl Checkout {
    pub fn new(calculator: PricingCalculator, order_info: OrderInfo) -> Self {
        Self {
            calculator,
            cart: Cart::new(),
            order_info,
            applied_promo: None,
        }
    }

    pub fn applied_promo(&self) -> Option<&str> {
        self.applied_promo.as_deref()
    }

    /// Applies a promo code, replacing any previous one.
    ///
    /// On error the applied code is left as it was.
    pub fn apply_promo(&mut self, input: &str) -> Result<&str, PricingError> {
        let (code, _) = self.calculator.validate_promo(input)?;
        Ok(self.applied_promo.insert(code).as_str())
    }

    pub fn remove_promo(&mut self) {
        self.applied_promo = None;
    }

    pub fn summary(&self) -> OrderSummary {
        self.calculator.summarize(
            self.cart.lines(),
            self.order_info.order_type(),
            self.applied_promo.as_deref(),
        )
    }

    /// The payload to send to the order store. The cart must not be empty.
    pub fn order_request(&self) -> Result<OrderCreate, PricingError> {
        if self.cart.is_empty() {
            return Err(PricingError::EmptyCart);
        }
        let summary = self.summary();
        Ok(OrderCreate {
            order_info: self.order_info.clone(),
            items: summary.items,
            total: summary.total,
        })
    }
}
