//! TOML invoice input files.
//!
//! ```toml
//! [invoice]
//! number = 42
//! date = "2024-01-15"
//!
//! [company]
//! name = "Acme Consulting"
//! # ...
//!
//! [client]
//! name = "Globex Corporation"
//! # ...
//!
//! [[items]]
//! label = "Consulting"
//! quantity = 10
//! unit_price = "100.00"
//! tax_rate = 19
//! ```

use std::path::Path;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use tia_core::invoice::{Client, Company, InvoiceMeta, LineItemInput};
use tia_shared::config::InvoiceDefaults;
use tia_shared::types::{Currency, SymbolPosition};
use tia_shared::{AppError, AppResult};

/// Parsed invoice file.
#[derive(Debug, Deserialize)]
pub struct InvoiceFile {
    pub invoice: InvoiceSection,
    pub company: Company,
    pub client: Client,
    #[serde(default)]
    pub items: Vec<LineItemInput>,
}

/// The `[invoice]` table. Absent fields fall back to configuration.
#[derive(Debug, Deserialize)]
pub struct InvoiceSection {
    pub number: u64,
    /// Issue date; today when absent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub symbol_position: Option<SymbolPosition>,
    #[serde(default)]
    pub vat: Option<Decimal>,
    #[serde(default)]
    pub deadline_days: Option<u32>,
    #[serde(default)]
    pub payment_terms: Option<String>,
}

impl InvoiceFile {
    pub fn read(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> AppResult<Self> {
        toml::from_str(text).map_err(|e| AppError::Validation(format!("invalid invoice file: {e}")))
    }

    /// Builds the metadata on top of the configured defaults.
    pub fn into_parts(self, defaults: &InvoiceDefaults) -> AppResult<(InvoiceMeta, Vec<LineItemInput>)> {
        let section = self.invoice;
        let issue_date = section.date.unwrap_or_else(|| Local::now().date_naive());
        let mut meta = InvoiceMeta::new(section.number, issue_date, self.company, self.client)
            .with_defaults(defaults)?;

        if let Some(title) = section.title {
            meta.title = title;
        }
        if let Some(code) = section.currency {
            let currency: Currency = code.parse().map_err(AppError::Validation)?;
            meta = meta.with_currency(currency);
        }
        if let Some(position) = section.symbol_position {
            meta.currency = meta.currency.with_position(position);
        }
        if let Some(vat) = section.vat {
            meta = meta.with_vat_rate(vat);
        }
        if let Some(days) = section.deadline_days {
            meta = meta.with_deadline_days(days);
        }
        if let Some(terms) = section.payment_terms {
            meta = meta.with_payment_terms(terms);
        }
        Ok((meta, self.items))
    }
}
