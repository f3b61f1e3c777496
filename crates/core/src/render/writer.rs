//! Output backends for a rendered [`Document`].

use std::fmt::{self, Write as _};

use super::document::{Document, LineItemView};
use crate::invoice::InvoiceError;

const TEXT_WIDTH: usize = 78;

/// Serializes a document into one output format.
pub trait DocumentWriter {
    /// Produces the complete output for `document`.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::Serialization` if the document cannot be encoded.
    fn write(&self, document: &Document) -> Result<String, InvoiceError>;
}

/// Plain text layout for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter;

impl TextWriter {
    fn layout(out: &mut String, document: &Document) -> fmt::Result {
        let header = &document.header;
        let footer = &document.footer;
        let rule = "-".repeat(TEXT_WIDTH);

        writeln!(out, "{} {}", header.title, header.number)?;
        writeln!(out, "{}", header.company_name)?;
        writeln!(out, "Date: {}    Due: {}", header.issue_date, header.due_date)?;
        writeln!(out)?;
        writeln!(out, "Bill to:")?;
        writeln!(out, "{}", header.client.name)?;
        for line in &header.client.address {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "Reference: {}", header.client.reference)?;
        writeln!(out)?;

        writeln!(
            out,
            "{:>3}  {:<30} {:>6} {:>14} {:>6} {:>14}",
            "Pos", "Description", "Qty", "Unit price", "VAT", "Amount"
        )?;
        writeln!(out, "{rule}")?;
        for row in &document.rows {
            Self::row(out, row)?;
            writeln!(out, "{rule}")?;
        }

        Self::total(out, "Total:", &footer.subtotal)?;
        Self::total(out, &format!("Taxes ({} %):", footer.vat_rate), &footer.taxes)?;
        Self::total(out, "Grand total:", &footer.grand_total)?;

        if !footer.payment_terms.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", footer.payment_terms)?;
        }

        let company = &footer.company;
        writeln!(out)?;
        writeln!(out, "{}", company.name)?;
        for line in &company.address {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "Phone: {}  Email: {}", company.phone, company.email)?;
        writeln!(out, "Tax number: {}", company.tax_number)?;
        writeln!(
            out,
            "IBAN: {}  BIC: {}  Bank: {}",
            company.iban, company.bic, company.bank
        )
    }

    fn row(out: &mut String, row: &LineItemView) -> fmt::Result {
        writeln!(
            out,
            "{:>3}  {:<30} {:>6} {:>14} {:>5}% {:>14}",
            row.position, row.label, row.quantity, row.unit_price, row.tax_rate, row.subtotal
        )?;
        if let Some(note) = &row.note {
            writeln!(out, "     {note}")?;
        }
        Ok(())
    }

    fn total(out: &mut String, label: &str, value: &str) -> fmt::Result {
        writeln!(out, "{label:>60} {value:>17}")
    }
}

impl DocumentWriter for TextWriter {
    fn write(&self, document: &Document) -> Result<String, InvoiceError> {
        let mut out = String::new();
        Self::layout(&mut out, document).map_err(layout_error)?;
        Ok(out)
    }
}

/// LaTeX body for the invoice document class.
///
/// Each row becomes `\invoiceitem{label}{qty}{unit price}{subtotal}{vat}{note}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexWriter;

impl LatexWriter {
    fn layout(out: &mut String, document: &Document) -> fmt::Result {
        let header = &document.header;
        let footer = &document.footer;
        let client = &header.client;
        let company = &footer.company;

        if let Some(logo) = &header.logo {
            writeln!(out, "\\invoicelogo{{{}}}", escape_latex(logo))?;
        }
        writeln!(
            out,
            "\\invoiceheader{{{}}}{{{}}}{{{}}}{{{}}}",
            escape_latex(&header.title),
            escape_latex(&header.number),
            escape_latex(&header.issue_date),
            escape_latex(&header.due_date)
        )?;
        writeln!(
            out,
            "\\invoiceclient{{{}}}{{{}}}{{{}}}",
            escape_latex(&client.name),
            escape_latex(&client.reference),
            escape_join(&client.address)
        )?;

        writeln!(out, "\\begin{{invoicetable}}")?;
        for row in &document.rows {
            writeln!(
                out,
                "\\invoiceitem{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}",
                escape_latex(&row.label),
                escape_latex(&row.quantity),
                escape_latex(&row.unit_price),
                escape_latex(&row.subtotal),
                escape_latex(&row.tax_rate),
                escape_latex(row.note.as_deref().unwrap_or_default())
            )?;
            writeln!(out, "\\hline")?;
        }
        writeln!(out, "\\end{{invoicetable}}")?;

        writeln!(
            out,
            "\\invoicetotals{{{}}}{{{}}}{{{}}}{{{}}}",
            escape_latex(&footer.subtotal),
            escape_latex(&footer.vat_rate),
            escape_latex(&footer.taxes),
            escape_latex(&footer.grand_total)
        )?;
        writeln!(out, "\\invoiceterms{{{}}}", escape_latex(&footer.payment_terms))?;
        writeln!(
            out,
            "\\invoicecompany{{{}}}{{{}}}{{{}}}{{{}}}{{{}}}",
            escape_latex(&company.name),
            escape_join(&company.address),
            escape_latex(&company.phone),
            escape_latex(&company.email),
            escape_latex(&company.tax_number)
        )?;
        writeln!(
            out,
            "\\invoicebank{{{}}}{{{}}}{{{}}}",
            escape_latex(&company.iban),
            escape_latex(&company.bic),
            escape_latex(&company.bank)
        )
    }
}

impl DocumentWriter for LatexWriter {
    fn write(&self, document: &Document) -> Result<String, InvoiceError> {
        let mut out = String::new();
        Self::layout(&mut out, document).map_err(layout_error)?;
        Ok(out)
    }
}

fn layout_error(err: fmt::Error) -> InvoiceError {
    InvoiceError::Serialization(err.to_string())
}

fn escape_join(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| escape_latex(line))
        .collect::<Vec<_>>()
        .join(" \\\\ ")
}

/// Escapes characters with a special meaning in LaTeX.
#[must_use]
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '$' | '%' | '&' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Pretty-printed JSON of the document model.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl DocumentWriter for JsonWriter {
    fn write(&self, document: &Document) -> Result<String, InvoiceError> {
        serde_json::to_string_pretty(document)
            .map_err(|e| InvoiceError::Serialization(e.to_string()))
    }
}
