//! Invoice rendering.
//!
//! Rendering happens in two steps: [`render`] builds a structured
//! [`Document`] from a finalized invoice, then a [`DocumentWriter`]
//! lays it out as text, LaTeX or JSON.

pub mod document;
pub mod format;
pub mod writer;

pub use document::{
    ClientBlock, CompanyBlock, DEFAULT_DATE_FORMAT, DEFAULT_NUMBER_WIDTH, Document, Footer, Header,
    LineItemView, RenderOptions, render,
};
pub use format::{
    Precision, format_amount, format_date, format_invoice_number, format_money, format_percent,
    format_quantity,
};
pub use writer::{DocumentWriter, JsonWriter, LatexWriter, TextWriter, escape_latex};
