//! # Terminal Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BISTRO_TAX_RATE=10                                                 │
//! │     BISTRO_DISCOUNT_CENTS=1000                                         │
//! │     BISTRO_ORDER_TYPE="take away"                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bistro-pos/terminal.toml (Linux)                         │
//! │     ~/Library/Application Support/com.bistro.pos/terminal.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     10% tax, $10.00 discount, house menu                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Bistro POS"
//! cashier = "Cashier 01"
//! tax_rate_bps = 1000
//! discount_cents = 1000
//! currency_symbol = "$"
//! default_order_type = "dine_in"
//! menu_path = "/etc/bistro/menu.toml"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bistro_core::validation::{validate_discount_cents, validate_tax_rate_bps};
use bistro_core::{CoreError, ExactMoney, Money, OrderType, TaxRate};

use crate::error::{TerminalError, TerminalResult};

/// Terminal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Store name for receipts and logs.
    pub store_name: String,

    /// Cashier signed in at this terminal, stamped on every order.
    pub cashier: String,

    /// Flat tax rate in basis points (1000 = 10%).
    pub tax_rate_bps: u32,

    /// Flat discount applied to every order, in cents.
    pub discount_cents: i64,

    /// Currency symbol placed before amounts. Amounts are always shown
    /// with two decimals since every price is in cents.
    pub currency_symbol: String,

    /// Service mode selected when the terminal starts.
    pub default_order_type: OrderType,

    /// Optional TOML menu file. The house menu is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_path: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            store_name: "Bistro POS".to_string(),
            cashier: "Cashier 01".to_string(),
            tax_rate_bps: 1000,
            discount_cents: 1000,
            currency_symbol: "$".to_string(),
            default_order_type: OrderType::DineIn,
            menu_path: None,
        }
    }
}

impl TerminalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`terminal.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> TerminalResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading terminal config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load terminal config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> TerminalResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| TerminalError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Terminal config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TerminalResult<()> {
        validate_tax_rate_bps(self.tax_rate_bps).map_err(CoreError::from)?;
        validate_discount_cents(self.discount_cents).map_err(CoreError::from)?;

        if self.cashier.trim().is_empty() {
            return Err(TerminalError::InvalidConfig("cashier must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `BISTRO_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = var("BISTRO_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(cashier) = var("BISTRO_CASHIER") {
            debug!(cashier = %cashier, "Overriding cashier from environment");
            self.cashier = cashier;
        }

        // Percent, e.g. "10" or "8.25"
        if let Some(rate) = var("BISTRO_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    self.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                    debug!(tax_rate_bps = self.tax_rate_bps, "Overriding tax rate from environment");
                }
                _ => warn!(rate = %rate, "Ignoring invalid BISTRO_TAX_RATE"),
            }
        }

        if let Some(discount) = var("BISTRO_DISCOUNT_CENTS") {
            match discount.parse::<i64>() {
                Ok(cents) => self.discount_cents = cents,
                Err(_) => warn!(discount = %discount, "Ignoring invalid BISTRO_DISCOUNT_CENTS"),
            }
        }

        if let Some(order_type) = var("BISTRO_ORDER_TYPE") {
            match order_type.parse::<OrderType>() {
                Ok(parsed) => self.default_order_type = parsed,
                Err(e) => warn!(error = %e, "Ignoring invalid BISTRO_ORDER_TYPE"),
            }
        }

        if let Some(path) = var("BISTRO_MENU_PATH") {
            self.menu_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bistro", "pos")
            .map(|dirs| dirs.config_dir().join("terminal.toml"))
    }

    /// The configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// The configured flat discount.
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Formats an amount with the configured symbol, rounded to the cent.
    ///
    /// This is where unrounded tax and totals finally meet the cent.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::{ExactMoney, Money};
    /// use bistro_terminal::TerminalConfig;
    ///
    /// let config = TerminalConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(2300)), "$23.00");
    /// assert_eq!(config.format_currency(ExactMoney::from_sub_cents(5000)), "$0.01");
    /// ```
    pub fn format_currency(&self, amount: impl Into<ExactMoney>) -> String {
        let cents = amount.into().round_to_cents();
        format!(
            "{}{}{}.{:02}",
            if cents.is_negative() { "-" } else { "" },
            self.currency_symbol,
            cents.dollars().abs(),
            cents.cents_part()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.tax_rate(), TaxRate::from_bps(1000));
        assert_eq!(config.discount(), Money::from_cents(1000));
        assert_eq!(config.default_order_type, OrderType::DineIn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = TerminalConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1000)), "-$10.00");
    }

    #[test]
    fn test_format_currency_other_symbol() {
        let config = TerminalConfig {
            currency_symbol: "¥".into(),
            ..TerminalConfig::default()
        };
        assert_eq!(config.format_currency(Money::from_cents(1500)), "¥15.00");
    }

    #[test]
    fn test_format_currency_rounds_exact_amounts() {
        let config = TerminalConfig::default();
        // 1.2375 cents
        assert_eq!(config.format_currency(ExactMoney::from_sub_cents(12_375)), "$0.01");
        // 5.5 cents + $10
        assert_eq!(
            config.format_currency(ExactMoney::from_sub_cents(10_055_000)),
            "$10.06"
        );
        assert_eq!(
            config.format_currency(ExactMoney::from_sub_cents(-10_005_000)),
            "-$10.01"
        );
    }

    #[test]
    fn test_unknown_decimals_key_is_ignored() {
        // Older files may still carry the key; it no longer changes output
        let config: TerminalConfig = toml::from_str("currency_decimals = 0").unwrap();
        assert_eq!(config.format_currency(Money::from_cents(1500)), "$15.00");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = TerminalConfig {
            tax_rate_bps: 10001,
            ..TerminalConfig::default()
        };
        assert!(matches!(config.validate(), Err(TerminalError::Core(_))));

        let config = TerminalConfig {
            discount_cents: -1,
            ..TerminalConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TerminalConfig {
            cashier: "  ".into(),
            ..TerminalConfig::default()
        };
        assert!(matches!(config.validate(), Err(TerminalError::InvalidConfig(_))));
    }

    #[test]
    fn test_overrides() {
        let mut config = TerminalConfig::default();
        config.apply_overrides(overrides(&[
            ("BISTRO_CASHIER", "Cashier 02"),
            ("BISTRO_TAX_RATE", "8.25"),
            ("BISTRO_DISCOUNT_CENTS", "0"),
            ("BISTRO_MENU_PATH", "/srv/menu.toml"),
            ("BISTRO_ORDER_TYPE", "Take Away"),
        ]));

        assert_eq!(config.cashier, "Cashier 02");
        assert_eq!(config.tax_rate_bps, 825);
        assert_eq!(config.discount_cents, 0);
        assert_eq!(config.menu_path, Some(PathBuf::from("/srv/menu.toml")));
        assert_eq!(config.default_order_type, OrderType::TakeAway);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = TerminalConfig::default();
        config.apply_overrides(overrides(&[
            ("BISTRO_TAX_RATE", "ten"),
            ("BISTRO_DISCOUNT_CENTS", "lots"),
            ("BISTRO_ORDER_TYPE", "drive thru"),
        ]));
        assert_eq!(config, TerminalConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: TerminalConfig = toml::from_str(
            r#"
            cashier = "Night Shift"
            default_order_type = "take_away"
            "#,
        )
        .unwrap();

        assert_eq!(config.cashier, "Night Shift");
        assert_eq!(config.default_order_type, OrderType::TakeAway);
        assert_eq!(config.tax_rate_bps, 1000);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("terminal.toml");

        let config = TerminalConfig {
            store_name: "Harbor Kitchen".into(),
            discount_cents: 250,
            ..TerminalConfig::default()
        };
        config.save(Some(path.clone())).unwrap();

        let loaded = TerminalConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.store_name, "Harbor Kitchen");
        assert_eq!(loaded.discount_cents, 250);
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("terminal.toml");
        std::fs::write(&path, "tax_rate_bps = \"lots\"").unwrap();

        assert!(matches!(
            TerminalConfig::load(Some(path.clone())),
            Err(TerminalError::Parse(_))
        ));
        assert_eq!(
            TerminalConfig::load_or_default(Some(path)).tax_rate_bps,
            TerminalConfig::default().tax_rate_bps
        );
    }
}
