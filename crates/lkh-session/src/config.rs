//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LKH_STORE_NAME="LKH Store"                                         │
//! │     LKH_MAX_LINE_QUANTITY=10                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/lkh-store/store.toml (Linux)                             │
//! │     ~/Library/Application Support/com.lkh.store/store.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     No cart ceilings, "$" with 2 decimals                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "LKH Store"
//! currency_symbol = "$"
//! currency_decimals = 2
//!
//! [cart]
//! max_line_quantity = 10   # omit for no ceiling
//! max_lines = 50           # omit for no ceiling
//! event_capacity = 64
//! ```

use lkh_core::validation::validate_limit;
use lkh_core::CartLimits;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Store Settings
// =============================================================================

/// Shop-front settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Store name shown in the header.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency symbol (for display).
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of decimal places for currency.
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_store_name() -> String {
    "LKH Store".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSettings {
    /// Highest quantity a single line may reach. None = no ceiling.
    #[serde(default)]
    pub max_line_quantity: Option<u32>,

    /// Highest number of distinct lines. None = no ceiling.
    #[serde(default)]
    pub max_lines: Option<usize>,

    /// Buffered change events per subscriber before it starts lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    64
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            max_line_quantity: None,
            max_lines: None,
            event_capacity: default_event_capacity(),
        }
    }
}

// =============================================================================
// Main Store Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (store.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document without applying overrides.
    pub fn from_toml(contents: &str) -> SessionResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> SessionResult<()> {
        if let Some(max) = self.cart.max_line_quantity {
            validate_limit("max_line_quantity", u64::from(max))?;
        }
        if let Some(max) = self.cart.max_lines {
            validate_limit("max_lines", max as u64)?;
        }

        if self.cart.event_capacity == 0 {
            return Err(SessionError::InvalidConfig(
                "event_capacity must be greater than 0".into(),
            ));
        }

        if self.store.currency_decimals > 4 {
            return Err(SessionError::InvalidConfig(format!(
                "currency_decimals must be at most 4, got {}",
                self.store.currency_decimals
            )));
        }

        Ok(())
    }

    /// Applies `LKH_*` overrides looked up through `lookup`.
    ///
    /// Unparseable numbers are ignored with a warning.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("LKH_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("LKH_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(max) = lookup("LKH_MAX_LINE_QUANTITY") {
            match max.parse::<u32>() {
                Ok(n) => {
                    debug!(max_line_quantity = n, "Overriding line ceiling from environment");
                    self.cart.max_line_quantity = Some(n);
                }
                Err(_) => warn!(value = %max, "Ignoring invalid LKH_MAX_LINE_QUANTITY"),
            }
        }

        if let Some(max) = lookup("LKH_MAX_CART_LINES") {
            match max.parse::<usize>() {
                Ok(n) => self.cart.max_lines = Some(n),
                Err(_) => warn!(value = %max, "Ignoring invalid LKH_MAX_CART_LINES"),
            }
        }

        if let Some(cap) = lookup("LKH_EVENT_CAPACITY") {
            match cap.parse::<usize>() {
                Ok(n) => self.cart.event_capacity = n,
                Err(_) => warn!(value = %cap, "Ignoring invalid LKH_EVENT_CAPACITY"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lkh", "store")
            .map(|dirs| dirs.config_dir().join("store.toml"))
    }

    /// Ceilings to enforce on cart increases.
    pub fn limits(&self) -> CartLimits {
        CartLimits {
            max_line_quantity: self.cart.max_line_quantity,
            max_lines: self.cart.max_lines,
        }
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use lkh_session::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(99_900), "$999.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        // Amounts are stored in hundredths whatever the display precision
        let decimals = u32::from(self.store.currency_decimals);
        let whole = cents / 100;
        let frac = (cents % 100).abs();

        let sign = if cents < 0 { "-" } else { "" };
        let symbol = &self.store.currency_symbol;

        match decimals {
            0 => format!("{}{}{}", sign, symbol, whole.abs()),
            1 => format!("{}{}{}.{}", sign, symbol, whole.abs(), frac / 10),
            _ => format!(
                "{}{}{}.{:02}{}",
                sign,
                symbol,
                whole.abs(),
                frac,
                "0".repeat(decimals as usize - 2)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.store.name, "LKH Store");
        assert_eq!(config.limits(), CartLimits::UNLIMITED);
        assert_eq!(config.cart.event_capacity, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = StoreConfig::from_toml(
            r#"
            [cart]
            max_line_quantity = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.cart.max_line_quantity, Some(10));
        assert_eq!(config.cart.max_lines, None);
        assert_eq!(config.store.currency_symbol, "$");
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = StoreConfig::from_toml("[cart\nmax_lines = ").unwrap_err();
        assert!(matches!(err, SessionError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = StoreConfig::default();
        config.apply_overrides(lookup_from(&[
            ("LKH_STORE_NAME", "Night Market"),
            ("LKH_MAX_LINE_QUANTITY", "5"),
            ("LKH_MAX_CART_LINES", "not-a-number"),
        ]));

        assert_eq!(config.store.name, "Night Market");
        assert_eq!(config.cart.max_line_quantity, Some(5));
        assert_eq!(config.cart.max_lines, None);
    }

    #[test]
    fn test_validation() {
        let mut config = StoreConfig::default();
        config.cart.max_line_quantity = Some(0);
        assert!(config.validate().is_err());

        config.cart.max_line_quantity = Some(1);
        config.cart.event_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("lkh-store-missing-config-test.toml");
        let config = StoreConfig::load(Some(path)).unwrap();
        assert_eq!(config.store.currency_decimals, 2);
    }

    #[test]
    fn test_format_currency() {
        let mut config = StoreConfig::default();
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(0), "$0.00");
        assert_eq!(config.format_currency(-550), "-$5.50");

        config.store.currency_decimals = 0;
        assert_eq!(config.format_currency(30_000_000), "$300000");
    }
}
