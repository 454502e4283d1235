//! # Configuration
//!
//! [`RestaurantConfig`] gathers the tunables of the service: pricing constants and promo
//! codes, admin password and session policy, and actor channel sizes. Every field has a
//! default, so an empty (or absent) TOML file yields a working configuration.
//!
//! ```toml
//! [pricing]
//! tax_rate = 0.0
//! delivery_fee = 200.0
//! discount_threshold = 5000.0
//! discount_rate = 0.05
//!
//! [pricing.promo_codes.FIDELE15]
//! rate = 0.15
//! description = "15% de réduction fidélité"
//!
//! [admin]
//! min_password_len = 6
//! session_ttl_secs = 28800
//! ```

use crate::password::DEFAULT_ITERATIONS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Environment variable naming the TOML file read by [`RestaurantConfig::load`].
pub const CONFIG_ENV: &str = "RESTAURANT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Longest accepted admin session lifetime.
pub const MAX_SESSION_TTL_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    pub pricing: PricingConfig,
    pub admin: AdminSettings,
    pub store: StoreSettings,
}

/// A discount rate granted by a promo code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub rate: f64,
    #[serde(default)]
    pub description: String,
}

impl PromoCode {
    pub fn new(rate: f64, description: impl Into<String>) -> Self {
        Self {
            rate,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Applied to the subtotal. Zero when menu prices already include tax.
    pub tax_rate: f64,
    /// Flat fee added to delivery orders.
    pub delivery_fee: f64,
    /// Subtotal from which the automatic discount applies (inclusive).
    pub discount_threshold: f64,
    pub discount_rate: f64,
    /// Keys are upper-case codes.
    pub promo_codes: BTreeMap<String, PromoCode>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let promo_codes = [
            ("BIENVENUE10", PromoCode::new(0.10, "10% de réduction")),
            ("FIDELE15", PromoCode::new(0.15, "15% de réduction fidélité")),
            ("ETUDIANT", PromoCode::new(0.08, "8% de réduction étudiant")),
        ]
        .into_iter()
        .map(|(code, promo)| (code.to_string(), promo))
        .collect();

        Self {
            tax_rate: 0.0,
            delivery_fee: 200.0,
            discount_threshold: 5000.0,
            discount_rate: 0.05,
            promo_codes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSettings {
    pub min_password_len: usize,
    pub pbkdf2_iterations: u32,
    pub session_ttl_secs: i64,
    /// How often expired sessions are swept from the store.
    pub session_purge_interval_secs: u64,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            min_password_len: 6,
            pbkdf2_iterations: DEFAULT_ITERATIONS,
            session_ttl_secs: 8 * 60 * 60,
            session_purge_interval_secs: 5 * 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Request channel capacity of each actor.
    pub buffer_size: usize,
    /// Capacity of the order event feed; slower subscribers lose the oldest events.
    pub feed_capacity: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            feed_capacity: 64,
        }
    }
}

impl RestaurantConfig {
    /// Reads the file named by `RESTAURANT_CONFIG`, or returns the defaults when it is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                info!("{CONFIG_ENV} not set, using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Loading configuration");
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(raw)?;
        config.pricing.promo_codes = std::mem::take(&mut config.pricing.promo_codes)
            .into_iter()
            .map(|(code, promo)| (code.trim().to_uppercase(), promo))
            .collect();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let pricing = &self.pricing;
        let rates = [
            ("tax_rate", pricing.tax_rate),
            ("discount_rate", pricing.discount_rate),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {rate}"
                )));
            }
        }
        for (code, promo) in &pricing.promo_codes {
            if !(0.0..=1.0).contains(&promo.rate) {
                return Err(ConfigError::Invalid(format!(
                    "promo code {code} rate must be within [0, 1], got {}",
                    promo.rate
                )));
            }
        }
        if pricing.delivery_fee < 0.0 || pricing.discount_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "delivery_fee and discount_threshold must not be negative".into(),
            ));
        }
        if self.admin.pbkdf2_iterations == 0 {
            return Err(ConfigError::Invalid("pbkdf2_iterations must be positive".into()));
        }
        if self.admin.session_ttl_secs <= 0 || self.admin.session_purge_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "session_ttl_secs and session_purge_interval_secs must be positive".into(),
            ));
        }
        if self.admin.session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(ConfigError::Invalid(format!(
                "session_ttl_secs must be at most {MAX_SESSION_TTL_SECS} (365 days), got {}",
                self.admin.session_ttl_secs
            )));
        }
        if self.store.buffer_size == 0 || self.store.feed_capacity == 0 {
            return Err(ConfigError::Invalid("channel capacities must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = RestaurantConfig::from_toml("").unwrap();
        assert_eq!(config.pricing.delivery_fee, 200.0);
        assert_eq!(config.pricing.discount_threshold, 5000.0);
        assert_eq!(config.pricing.promo_codes.len(), 3);
        assert_eq!(config.admin.min_password_len, 6);
    }

    #[test]
    fn partial_file_overrides_and_normalises_codes() {
        let raw = r#"
            [pricing]
            delivery_fee = 150.0

            [pricing.promo_codes.summer20]
            rate = 0.2
        "#;
        let config = RestaurantConfig::from_toml(raw).unwrap();
        assert_eq!(config.pricing.delivery_fee, 150.0);
        assert_eq!(config.pricing.discount_rate, 0.05);
        assert!(config.pricing.promo_codes.contains_key("SUMMER20"));
        assert_eq!(config.pricing.promo_codes.len(), 1);
    }

    #[test]
    fn out_of_range_rate_is_rejected() {
        let raw = "[pricing]\ndiscount_rate = 1.5\n";
        assert!(matches!(
            RestaurantConfig::from_toml(raw),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn session_ttl_beyond_a_year_is_rejected() {
        let raw = "[admin]\nsession_ttl_secs = 9000000000000000\n";
        assert!(matches!(
            RestaurantConfig::from_toml(raw),
            Err(ConfigError::Invalid(_))
        ));

        let mut config = RestaurantConfig::default();
        config.admin.session_ttl_secs = MAX_SESSION_TTL_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacities_are_rejected() {
        let mut config = RestaurantConfig::default();
        config.store.feed_capacity = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = RestaurantConfig::default();
        config.admin.session_purge_interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let raw = "[admin]\nmin_password_len = \"six\"\n";
        assert!(matches!(
            RestaurantConfig::from_toml(raw),
            Err(ConfigError::Parse(_))
        ));
    }
}
