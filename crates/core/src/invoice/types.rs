//! Invoice domain types.
//!
//! This module defines the parties of an invoice, the invoice metadata,
//! line item declarations and the immutable declared line items.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tia_shared::config::InvoiceDefaults;
use tia_shared::types::Currency;

use super::error::InvoiceError;
use super::validation::{parse_decimal, validate_vat_rate};

/// Postal and email data shared by company and client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Name of the company or client.
    pub name: String,
    /// Street address.
    pub street: String,
    /// Postcode.
    pub postcode: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Official email address.
    pub email: String,
}

impl Party {
    /// Address as printed: street, "postcode, city", country.
    #[must_use]
    pub fn address_lines(&self) -> Vec<String> {
        vec![
            self.street.clone(),
            format!("{}, {}", self.postcode, self.city),
            self.country.clone(),
        ]
    }
}

/// The client an invoice is prepared for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Postal and email data.
    #[serde(flatten)]
    pub party: Party,
    /// Client reference number.
    pub reference: String,
    /// Address for invoice correspondence.
    #[serde(default)]
    pub invoice_email: Option<String>,
    /// Address for payment reminders.
    #[serde(default)]
    pub reminder_email: Option<String>,
}

impl Client {
    /// Invoice address, falling back to the official email.
    #[must_use]
    pub fn invoice_email(&self) -> &str {
        self.invoice_email.as_deref().unwrap_or(&self.party.email)
    }

    /// Reminder address, falling back to the official email.
    #[must_use]
    pub fn reminder_email(&self) -> &str {
        self.reminder_email.as_deref().unwrap_or(&self.party.email)
    }
}

/// The company issuing an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Postal and email data.
    #[serde(flatten)]
    pub party: Party,
    /// Phone number.
    pub phone: String,
    /// Tax number or VAT ID.
    pub tax_number: String,
    /// Logo reference (path or URL) printed in the header.
    #[serde(default)]
    pub logo: Option<String>,
    /// IBAN of the payment account.
    pub iban: String,
    /// BIC of the payment account.
    #[serde(default)]
    pub bic: Option<String>,
    /// Bank name.
    #[serde(default)]
    pub bank: Option<String>,
}

impl Company {
    /// Checks that the bank account data is complete.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::AccountDataMissing` if IBAN, BIC or bank is blank.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        if self.iban.trim().is_empty() {
            return Err(InvoiceError::AccountDataMissing("Company IBAN is missing."));
        }
        if self.bic.as_deref().is_none_or(|bic| bic.trim().is_empty()) {
            return Err(InvoiceError::AccountDataMissing("Company BIC is missing."));
        }
        if self.bank.as_deref().is_none_or(|bank| bank.trim().is_empty()) {
            return Err(InvoiceError::AccountDataMissing("Company Bank is missing."));
        }
        Ok(())
    }
}

/// Invoice metadata: everything on the document except the items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    /// Invoice number, zero-padded on display.
    pub number: u64,
    /// Document title.
    pub title: String,
    /// Issue date.
    pub issue_date: NaiveDate,
    /// Days until the invoice is due.
    pub deadline_days: u32,
    /// Currency of all amounts.
    pub currency: Currency,
    /// Default VAT in percent for items without an explicit rate.
    pub vat_rate: Decimal,
    /// Issuing company.
    pub company: Company,
    /// Client.
    pub client: Client,
    /// Payment terms printed in the footer.
    pub payment_terms: String,
}

impl InvoiceMeta {
    /// Default due-date offset in days.
    pub const DEFAULT_DEADLINE_DAYS: u32 = 30;

    /// Creates metadata with EUR, 0 % VAT and a 30 day deadline.
    #[must_use]
    pub fn new(number: u64, issue_date: NaiveDate, company: Company, client: Client) -> Self {
        Self {
            number,
            title: "Invoice".to_string(),
            issue_date,
            deadline_days: Self::DEFAULT_DEADLINE_DAYS,
            currency: Currency::default(),
            vat_rate: Decimal::ZERO,
            company,
            client,
            payment_terms: String::new(),
        }
    }

    /// Applies configured defaults (VAT, deadline, currency, terms).
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::InvalidMeta` if the deadline is negative or too large.
    pub fn with_defaults(mut self, defaults: &InvoiceDefaults) -> Result<Self, InvoiceError> {
        self.deadline_days = u32::try_from(defaults.deadline_days).map_err(|_| {
            InvoiceError::InvalidMeta(format!(
                "deadline must be a non-negative number of days, got {}",
                defaults.deadline_days
            ))
        })?;
        self.vat_rate = defaults.vat;
        self.currency = defaults.currency();
        self.payment_terms.clone_from(&defaults.payment_terms);
        Ok(self)
    }

    /// Sets the default VAT rate.
    #[must_use]
    pub fn with_vat_rate(mut self, vat_rate: Decimal) -> Self {
        self.vat_rate = vat_rate;
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the due-date offset.
    #[must_use]
    pub fn with_deadline_days(mut self, days: u32) -> Self {
        self.deadline_days = days;
        self
    }

    /// Sets the payment terms.
    #[must_use]
    pub fn with_payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = terms.into();
        self
    }

    /// Issue date plus the deadline.
    #[must_use]
    pub fn due_date(&self) -> NaiveDate {
        self.issue_date
            .checked_add_days(Days::new(u64::from(self.deadline_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Validates the default VAT and the company account data.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), InvoiceError> {
        validate_vat_rate(self.vat_rate).map_err(InvoiceError::InvalidMeta)?;
        if self.title.trim().is_empty() {
            return Err(InvoiceError::InvalidMeta("title must not be blank".into()));
        }
        self.company.validate()
    }
}

/// A line item as declared, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    /// What is billed.
    pub label: String,
    /// Quantity (hours, units, ...).
    pub quantity: Decimal,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// VAT in percent; the invoice default applies when absent.
    #[serde(default)]
    pub tax_rate: Option<Decimal>,
    /// Optional detail printed below the row.
    #[serde(default)]
    pub note: Option<String>,
}

impl LineItemInput {
    /// Creates a declaration without explicit rate or note.
    #[must_use]
    pub fn new(label: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            label: label.into(),
            quantity,
            unit_price,
            tax_rate: None,
            note: None,
        }
    }

    /// Sets an explicit tax rate.
    #[must_use]
    pub fn with_tax_rate(mut self, rate: Decimal) -> Self {
        self.tax_rate = Some(rate);
        self
    }

    /// Sets the note. An empty note counts as no note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.is_empty()).then_some(note);
        self
    }
}

impl std::str::FromStr for LineItemInput {
    type Err = InvoiceError;

    /// Parses `label;quantity;unit_price[;tax_rate[;note]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.splitn(5, ';').map(str::trim);
        let label = fields.next().unwrap_or_default();
        let quantity = parse_decimal("quantity", fields.next().unwrap_or_default())?;
        let unit_price = parse_decimal("unit_price", fields.next().unwrap_or_default())?;

        let mut input = Self::new(label, quantity, unit_price);
        if let Some(rate) = fields.next().filter(|rate| !rate.is_empty()) {
            input = input.with_tax_rate(parse_decimal("tax_rate", rate)?);
        }
        if let Some(note) = fields.next() {
            input = input.with_note(note);
        }
        Ok(input)
    }
}

/// A declared line item with its computed amounts.
///
/// Immutable once declared: fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    label: String,
    quantity: Decimal,
    unit_price: Decimal,
    tax_rate: Decimal,
    note: Option<String>,
    subtotal: Decimal,
    tax: Decimal,
}

impl LineItem {
    pub(crate) fn new(
        input: LineItemInput,
        tax_rate: Decimal,
        subtotal: Decimal,
        tax: Decimal,
    ) -> Self {
        Self {
            label: input.label,
            quantity: input.quantity,
            unit_price: input.unit_price,
            tax_rate,
            note: input.note.filter(|note| !note.is_empty()),
            subtotal,
            tax,
        }
    }

    /// What is billed.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Quantity as declared.
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Unit price as declared.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Applied VAT rate in percent.
    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Optional note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// `round(quantity * unit_price, 2)`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// `round(subtotal * tax_rate / 100, 2)`.
    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.tax
    }
}

/// Accumulated totals of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InvoiceTotals {
    /// Sum of rounded item subtotals.
    pub subtotal: Decimal,
    /// Sum of rounded item taxes.
    pub tax_total: Decimal,
    /// `subtotal + tax_total`.
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Creates totals from the two running sums.
    ///
    /// The accumulator checks that the sum fits before accepting an item.
    #[must_use]
    pub fn new(subtotal: Decimal, tax_total: Decimal) -> Self {
        Self {
            subtotal,
            tax_total,
            grand_total: subtotal + tax_total,
        }
    }
}
