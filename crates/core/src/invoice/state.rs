//! Running invoice state: the item accumulator.
//!
//! An [`InvoiceState`] is created empty, mutated once per item declaration
//! and consumed by [`InvoiceState::finalize`]. The finalized invoice is
//! read-only; there is no way back to accumulating.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tia_shared::types::{MONEY_DECIMAL_PLACES, round_money};
use tracing::debug;

use super::error::InvoiceError;
use super::types::{InvoiceMeta, InvoiceTotals, LineItem, LineItemInput};
use super::validation::validate_item;
use crate::render::{LineItemView, Precision};

/// An invoice that is still accepting line items.
#[derive(Debug, Clone)]
pub struct InvoiceState {
    meta: InvoiceMeta,
    items: Vec<LineItem>,
    subtotal: Decimal,
    tax_total: Decimal,
}

impl InvoiceState {
    /// Creates an empty state for `meta`.
    ///
    /// # Errors
    ///
    /// Returns the metadata validation error, if any.
    pub fn new(meta: InvoiceMeta) -> Result<Self, InvoiceError> {
        meta.validate()?;
        Ok(Self {
            meta,
            items: Vec::new(),
            subtotal: Decimal::ZERO,
            tax_total: Decimal::ZERO,
        })
    }

    /// Declares a line item and updates the running totals.
    ///
    /// The item is rejected before any total changes if it is invalid.
    /// A missing tax rate resolves to the invoice default VAT.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::InvalidItem` or `InvoiceError::AmountOverflow`.
    pub fn add_item(&mut self, input: LineItemInput) -> Result<LineItemView, InvoiceError> {
        let position = self.items.len() + 1;
        let tax_rate = input.tax_rate.unwrap_or(self.meta.vat_rate);
        validate_item(position, &input, tax_rate)?;

        let (subtotal, tax) = item_amounts(input.quantity, input.unit_price, tax_rate)
            .ok_or(InvoiceError::AmountOverflow(position))?;
        let running_subtotal = self
            .subtotal
            .checked_add(subtotal)
            .ok_or(InvoiceError::AmountOverflow(position))?;
        let running_tax = self
            .tax_total
            .checked_add(tax)
            .ok_or(InvoiceError::AmountOverflow(position))?;
        running_subtotal
            .checked_add(running_tax)
            .ok_or(InvoiceError::AmountOverflow(position))?;

        let item = LineItem::new(input, tax_rate, subtotal, tax);
        debug!(
            position,
            label = item.label(),
            %subtotal,
            %tax,
            "Line item declared"
        );

        self.subtotal = running_subtotal;
        self.tax_total = running_tax;
        let view = LineItemView::of(position, &item, &self.meta.currency, Precision::MONEY);
        self.items.push(item);
        Ok(view)
    }

    /// Declares several items in order, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the error of the first rejected item.
    pub fn add_items<I>(&mut self, inputs: I) -> Result<Vec<LineItemView>, InvoiceError>
    where
        I: IntoIterator<Item = LineItemInput>,
    {
        inputs.into_iter().map(|input| self.add_item(input)).collect()
    }

    /// The invoice metadata.
    #[must_use]
    pub fn meta(&self) -> &InvoiceMeta {
        &self.meta
    }

    /// Items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Current running totals.
    #[must_use]
    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::new(self.subtotal, self.tax_total)
    }

    /// Stops accepting items.
    #[must_use]
    pub fn finalize(self) -> FinalizedInvoice {
        let totals = self.totals();
        debug!(
            number = self.meta.number,
            items = self.items.len(),
            subtotal = %totals.subtotal,
            tax_total = %totals.tax_total,
            "Invoice finalized"
        );
        FinalizedInvoice {
            meta: self.meta,
            items: self.items,
            totals,
        }
    }
}

/// `(round(qty * price, 2), round(subtotal * rate / 100, 2))`, or `None` on overflow.
fn item_amounts(quantity: Decimal, unit_price: Decimal, tax_rate: Decimal) -> Option<(Decimal, Decimal)> {
    let subtotal = round_money(quantity.checked_mul(unit_price)?, MONEY_DECIMAL_PLACES);
    let tax = round_money(
        subtotal.checked_mul(tax_rate)?.checked_div(Decimal::ONE_HUNDRED)?,
        MONEY_DECIMAL_PLACES,
    );
    Some((subtotal, tax))
}

/// A read-only invoice ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedInvoice {
    meta: InvoiceMeta,
    items: Vec<LineItem>,
    totals: InvoiceTotals,
}

impl FinalizedInvoice {
    /// The invoice metadata.
    #[must_use]
    pub fn meta(&self) -> &InvoiceMeta {
        &self.meta
    }

    /// Items in declaration order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Final totals.
    #[must_use]
    pub fn totals(&self) -> InvoiceTotals {
        self.totals
    }

    /// The single VAT rate shared by all items, if there is exactly one.
    #[must_use]
    pub fn uniform_tax_rate(&self) -> Option<Decimal> {
        let first = self.items.first()?.tax_rate();
        self.items
            .iter()
            .all(|item| item.tax_rate() == first)
            .then_some(first)
    }

    /// Compact overview of the invoice.
    #[must_use]
    pub fn summary(&self) -> InvoiceSummary {
        let effective_vat = if self.totals.subtotal.is_zero() {
            Decimal::ZERO
        } else {
            round_money(
                self.totals.tax_total / self.totals.subtotal * Decimal::ONE_HUNDRED,
                MONEY_DECIMAL_PLACES,
            )
        };
        InvoiceSummary {
            number: self.meta.number,
            total: self.totals.grand_total,
            tax: self.totals.tax_total,
            effective_vat,
            due_date: self.meta.due_date(),
        }
    }
}

/// Key figures of a finalized invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceSummary {
    /// Invoice number.
    pub number: u64,
    /// Grand total.
    pub total: Decimal,
    /// Tax total.
    pub tax: Decimal,
    /// `tax / subtotal * 100`, rounded to 2 places; 0 for a zero subtotal.
    pub effective_vat: Decimal,
    /// Date by which the invoice must be settled.
    pub due_date: NaiveDate,
}
