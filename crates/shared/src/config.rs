//! Application configuration management.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::{Currency, SymbolPosition};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Defaults applied to every new invoice.
    #[serde(default)]
    pub invoice: InvoiceDefaults,
    /// Document rendering options.
    #[serde(default)]
    pub render: RenderConfig,
}

/// Defaults for a new invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceDefaults {
    /// VAT in percent for items that do not declare their own rate.
    #[serde(default)]
    pub vat: Decimal,
    /// Days between issue date and due date.
    #[serde(default = "default_deadline_days")]
    pub deadline_days: i64,
    /// Payment terms printed in the footer.
    #[serde(default)]
    pub payment_terms: String,
    /// ISO 4217 currency code.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    /// Currency symbol shown next to amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Whether the symbol goes before or after the amount.
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

fn default_deadline_days() -> i64 {
    30
}

fn default_currency_code() -> String {
    "EUR".to_string()
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            vat: Decimal::ZERO,
            deadline_days: default_deadline_days(),
            payment_terms: String::new(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            symbol_position: SymbolPosition::default(),
        }
    }
}

impl InvoiceDefaults {
    /// The configured currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        Currency::new(
            self.currency_code.clone(),
            self.currency_symbol.clone(),
            self.symbol_position,
        )
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Decimal places for displayed amounts. Signed so that invalid values
    /// reach the formatter and are reported there.
    #[serde(default = "default_precision")]
    pub precision: i64,
    /// chrono format pattern for dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Width the invoice number is zero-padded to.
    #[serde(default = "default_number_width")]
    pub number_width: usize,
}

fn default_precision() -> i64 {
    2
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_number_width() -> usize {
    7
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            date_format: default_date_format(),
            number_width: default_number_width(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, layering `path` over the default files and
    /// under the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is missing or any source is malformed.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder
            .add_source(config::Environment::with_prefix("TIA").separator("__"))
            .build()?
            .try_deserialize()
    }
}
