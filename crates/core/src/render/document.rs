//! The structured invoice document.
//!
//! [`render`] turns a [`FinalizedInvoice`] into a [`Document`]: a header,
//! one row per item in declaration order and a footer with the totals.
//! All values are already formatted, so writers only lay them out.

use serde::Serialize;
use tia_shared::config::RenderConfig;
use tia_shared::types::Currency;
use tracing::debug;

use super::format::{
    Precision, format_date, format_invoice_number, format_money, format_percent, format_quantity,
};
use crate::invoice::{Client, Company, FinalizedInvoice, InvoiceError, LineItem};

/// Default width of the zero-padded invoice number.
pub const DEFAULT_NUMBER_WIDTH: usize = 7;

/// Default date pattern.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A declared item formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemView {
    /// 1-based declaration position.
    pub position: usize,
    /// What is billed.
    pub label: String,
    /// Quantity without decimals.
    pub quantity: String,
    /// Unit price with currency symbol.
    pub unit_price: String,
    /// Item subtotal with currency symbol.
    pub subtotal: String,
    /// VAT rate in percent.
    pub tax_rate: String,
    /// Optional note row.
    pub note: Option<String>,
}

impl LineItemView {
    /// Formats `item` for display.
    #[must_use]
    pub fn of(position: usize, item: &LineItem, currency: &Currency, precision: Precision) -> Self {
        Self {
            position,
            label: item.label().to_string(),
            quantity: format_quantity(item.quantity()),
            unit_price: format_money(item.unit_price(), currency, precision),
            subtotal: format_money(item.subtotal(), currency, precision),
            tax_rate: format_percent(item.tax_rate()),
            note: item.note().map(str::to_string),
        }
    }
}

/// Options controlling how a document is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Decimal places for amounts.
    pub precision: Precision,
    /// strftime-style pattern for dates.
    pub date_format: String,
    /// Width of the zero-padded invoice number.
    pub number_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            precision: Precision::MONEY,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            number_width: DEFAULT_NUMBER_WIDTH,
        }
    }
}

impl RenderOptions {
    /// Builds options from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::UnsupportedPrecision` for an invalid precision.
    pub fn from_config(config: &RenderConfig) -> Result<Self, InvoiceError> {
        Ok(Self {
            precision: Precision::new(config.precision)?,
            date_format: config.date_format.clone(),
            number_width: config.number_width,
        })
    }
}

/// Client block of the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientBlock {
    /// Client name.
    pub name: String,
    /// Client reference number.
    pub reference: String,
    /// Street, "postcode, city", country.
    pub address: Vec<String>,
    /// Invoice correspondence address.
    pub email: String,
}

impl From<&Client> for ClientBlock {
    fn from(client: &Client) -> Self {
        Self {
            name: client.party.name.clone(),
            reference: client.reference.clone(),
            address: client.party.address_lines(),
            email: client.invoice_email().to_string(),
        }
    }
}

/// Company contact and bank details printed in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyBlock {
    /// Company name.
    pub name: String,
    /// Street, "postcode, city", country.
    pub address: Vec<String>,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Tax number or VAT ID.
    pub tax_number: String,
    /// IBAN.
    pub iban: String,
    /// BIC.
    pub bic: String,
    /// Bank name.
    pub bank: String,
}

impl From<&Company> for CompanyBlock {
    fn from(company: &Company) -> Self {
        Self {
            name: company.party.name.clone(),
            address: company.party.address_lines(),
            phone: company.phone.clone(),
            email: company.party.email.clone(),
            tax_number: company.tax_number.clone(),
            iban: company.iban.clone(),
            bic: company.bic.clone().unwrap_or_default(),
            bank: company.bank.clone().unwrap_or_default(),
        }
    }
}

/// Document header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Logo reference.
    pub logo: Option<String>,
    /// Document title.
    pub title: String,
    /// Zero-padded invoice number.
    pub number: String,
    /// Issuing company name.
    pub company_name: String,
    /// Client block.
    pub client: ClientBlock,
    /// Issue date.
    pub issue_date: String,
    /// Due date.
    pub due_date: String,
}

/// Document footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Pre-tax total.
    pub subtotal: String,
    /// VAT percentage shown next to the taxes.
    pub vat_rate: String,
    /// Tax total.
    pub taxes: String,
    /// Amount due.
    pub grand_total: String,
    /// Payment terms text.
    pub payment_terms: String,
    /// Company contact block.
    pub company: CompanyBlock,
}

/// A rendered invoice, ready for a [`DocumentWriter`](super::DocumentWriter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Header block.
    pub header: Header,
    /// Item rows in declaration order.
    pub rows: Vec<LineItemView>,
    /// Footer block.
    pub footer: Footer,
}

/// Renders a finalized invoice.
///
/// # Errors
///
/// Returns `InvoiceError::InvalidDateFormat` if `options.date_format` cannot
/// be applied to the issue or due date.
pub fn render(invoice: &FinalizedInvoice, options: &RenderOptions) -> Result<Document, InvoiceError> {
    let meta = invoice.meta();
    let currency = &meta.currency;
    let precision = options.precision;
    let totals = invoice.totals();

    let header = Header {
        logo: meta.company.logo.clone(),
        title: meta.title.clone(),
        number: format_invoice_number(meta.number, options.number_width),
        company_name: meta.company.party.name.clone(),
        client: ClientBlock::from(&meta.client),
        issue_date: format_date(meta.issue_date, &options.date_format)?,
        due_date: format_date(meta.due_date(), &options.date_format)?,
    };

    let rows: Vec<LineItemView> = invoice
        .items()
        .iter()
        .enumerate()
        .map(|(index, item)| LineItemView::of(index + 1, item, currency, precision))
        .collect();

    let footer = Footer {
        subtotal: format_money(totals.subtotal, currency, precision),
        vat_rate: format_percent(vat_label_rate(invoice)),
        taxes: format_money(totals.tax_total, currency, precision),
        grand_total: format_money(totals.grand_total, currency, precision),
        payment_terms: meta.payment_terms.clone(),
        company: CompanyBlock::from(&meta.company),
    };

    debug!(
        number = %header.number,
        rows = rows.len(),
        grand_total = %footer.grand_total,
        "Invoice rendered"
    );

    Ok(Document {
        header,
        rows,
        footer,
    })
}

/// The shared item rate, the effective rate for mixed rates, or the
/// invoice default when there are no items.
fn vat_label_rate(invoice: &FinalizedInvoice) -> rust_decimal::Decimal {
    if invoice.items().is_empty() {
        return invoice.meta().vat_rate;
    }
    invoice
        .uniform_tax_rate()
        .unwrap_or_else(|| invoice.summary().effective_vat)
}
