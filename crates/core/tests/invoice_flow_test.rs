//! Integration tests for the declare, finalize and render flow.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tia_core::invoice::{Client, Company, InvoiceError, InvoiceMeta, InvoiceState, LineItemInput, Party};
use tia_core::render::{
    DocumentWriter, JsonWriter, LatexWriter, Precision, RenderOptions, TextWriter, render,
};
use tia_shared::AppError;
use tia_shared::types::{Currency, SymbolPosition};

fn party(name: &str, email: &str) -> Party {
    Party {
        name: name.to_string(),
        street: "Long Road 12".to_string(),
        postcode: "20095".to_string(),
        city: "Hamburg".to_string(),
        country: "Germany".to_string(),
        email: email.to_string(),
    }
}

fn meta() -> InvoiceMeta {
    let company = Company {
        party: party("Nordlicht GmbH", "hello@nordlicht.example"),
        phone: "+49 40 555 0101".to_string(),
        tax_number: "DE811907980".to_string(),
        logo: None,
        iban: "DE02120300000000202051".to_string(),
        bic: Some("BYLADEM1001".to_string()),
        bank: Some("Deutsche Kreditbank".to_string()),
    };
    let client = Client {
        party: party("Initech", "accounts@initech.example"),
        reference: "C-2001".to_string(),
        invoice_email: Some("invoices@initech.example".to_string()),
        reminder_email: None,
    };
    InvoiceMeta::new(
        42,
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        company,
        client,
    )
    .with_vat_rate(dec!(19))
}

fn consulting() -> LineItemInput {
    LineItemInput::new("Consulting", dec!(10), dec!(100.00)).with_tax_rate(dec!(19))
}

#[test]
fn test_single_consulting_item() {
    let mut state = InvoiceState::new(meta()).unwrap();
    let view = state.add_item(consulting()).unwrap();
    assert_eq!(view.subtotal, "1000.00 €");

    let invoice = state.finalize();
    let totals = invoice.totals();
    assert_eq!(totals.subtotal, dec!(1000.00));
    assert_eq!(totals.tax_total, dec!(190.00));

    let doc = render(&invoice, &RenderOptions::default()).unwrap();
    assert_eq!(doc.header.number, "0000042");
    assert_eq!(doc.header.due_date, "2024-06-01");
    assert_eq!(doc.header.client.email, "invoices@initech.example");
}

#[test]
fn test_two_consulting_items() {
    let mut state = InvoiceState::new(meta()).unwrap();
    state.add_items([consulting(), consulting()]).unwrap();
    let invoice = state.finalize();

    let totals = invoice.totals();
    assert_eq!(totals.subtotal, dec!(2000.00));
    assert_eq!(totals.tax_total, dec!(380.00));
    assert_eq!(totals.grand_total, dec!(2380.00));

    let doc = render(&invoice, &RenderOptions::default()).unwrap();
    assert_eq!(doc.footer.grand_total, "2380.00 €");
    assert_eq!(doc.footer.vat_rate, "19");
}

#[test]
fn test_prefix_currency_document() {
    let meta = meta().with_currency(Currency::eur().with_position(SymbolPosition::Prefix));
    let mut state = InvoiceState::new(meta).unwrap();
    state
        .add_item(LineItemInput::new("Licence", dec!(1), dec!(1234.5)).with_tax_rate(dec!(0)))
        .unwrap();
    let doc = render(&state.finalize(), &RenderOptions::default()).unwrap();
    assert_eq!(doc.footer.subtotal, "€ 1234.50");
    assert_eq!(doc.footer.grand_total, "€ 1234.50");
}

#[test]
fn test_default_rate_applies_to_items_without_rate() {
    let mut state = InvoiceState::new(meta()).unwrap();
    state
        .add_item(LineItemInput::new("Workshop", dec!(1), dec!(200)))
        .unwrap();
    assert_eq!(state.totals().tax_total, dec!(38.00));
}

#[test]
fn test_zero_quantity_row_is_rendered() {
    let mut state = InvoiceState::new(meta()).unwrap();
    state
        .add_item(LineItemInput::new("Travel (waived)", dec!(0), dec!(80)))
        .unwrap();
    let doc = render(&state.finalize(), &RenderOptions::default()).unwrap();
    assert_eq!(doc.rows.len(), 1);
    assert_eq!(doc.rows[0].subtotal, "0.00 €");
    assert_eq!(doc.footer.grand_total, "0.00 €");
}

#[test]
fn test_invalid_item_aborts_with_description() {
    let mut state = InvoiceState::new(meta()).unwrap();
    state.add_item(consulting()).unwrap();
    let err = state
        .add_item(LineItemInput::new("Discount", dec!(1), dec!(-50)))
        .unwrap_err();
    assert!(err.to_string().contains("Invalid item #2 (Discount)"));

    let app: AppError = err.into();
    assert_eq!(app.exit_code(), 65);
    assert_eq!(state.totals().subtotal, dec!(1000.00));
}

#[test]
fn test_textual_items_are_parsed() {
    let mut state = InvoiceState::new(meta()).unwrap();
    let input: LineItemInput = "Consulting;10;100.00;19;Remote".parse().unwrap();
    state.add_item(input).unwrap();
    assert_eq!(state.totals().grand_total, dec!(1190.00));

    let err = "Consulting;10;lots".parse::<LineItemInput>().unwrap_err();
    assert!(matches!(err, InvoiceError::NotANumber { field: "unit_price", .. }));
}

#[test]
fn test_negative_precision_is_formatting_error() {
    let err = Precision::new(-1).unwrap_err();
    let app: AppError = err.into();
    assert!(matches!(app, AppError::Formatting(_)));
}

#[test]
fn test_all_writers_render_same_invoice_twice() {
    let mut state = InvoiceState::new(meta()).unwrap();
    state
        .add_items([
            consulting(),
            LineItemInput::new("Hosting", dec!(12), dec!(9.99)).with_note("Jan to Dec"),
        ])
        .unwrap();
    let invoice = state.finalize();
    let options = RenderOptions::default();

    let writers: [&dyn DocumentWriter; 3] = [&TextWriter, &LatexWriter, &JsonWriter];
    for writer in writers {
        let first = writer.write(&render(&invoice, &options).unwrap()).unwrap();
        let second = writer.write(&render(&invoice, &options).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.contains("0000042"));
    }
}

#[test]
fn test_summary_figures() {
    let mut state = InvoiceState::new(meta()).unwrap();
    state
        .add_items([
            consulting(),
            LineItemInput::new("Books", dec!(1), dec!(1000)).with_tax_rate(dec!(7)),
        ])
        .unwrap();
    let summary = state.finalize().summary();
    assert_eq!(summary.total, dec!(2260.00));
    assert_eq!(summary.effective_vat, dec!(13));
    assert_eq!(summary.due_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert!(summary.tax > Decimal::ZERO);
}
