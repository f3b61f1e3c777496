//! Property-based tests for the invoice accumulator.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tia_shared::types::round_money;

use super::state::InvoiceState;
use super::tests::sample_meta;
use super::types::{LineItem, LineItemInput};

/// Strategy for a non-negative quantity with up to three decimals (0 to 1,000).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|millis| Decimal::new(millis, 3))
}

/// Strategy for a unit price with up to four decimals (0 to 100,000).
fn unit_price() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

/// Strategy for a VAT rate in `0 <= rate < 100` with two decimals.
fn tax_rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn item() -> impl Strategy<Value = LineItemInput> {
    ("[A-Za-z][A-Za-z ]{0,15}", quantity(), unit_price(), tax_rate()).prop_map(
        |(label, quantity, unit_price, rate)| {
            LineItemInput::new(label, quantity, unit_price).with_tax_rate(rate)
        },
    )
}

fn accumulate(inputs: &[LineItemInput]) -> InvoiceState {
    let mut state = InvoiceState::new(sample_meta()).expect("valid meta");
    state.add_items(inputs.to_vec()).expect("valid items");
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Totals are sums of per-item rounded values.
    #[test]
    fn prop_totals_are_sum_of_rounded_items(inputs in prop::collection::vec(item(), 0..20)) {
        let state = accumulate(&inputs);

        let mut expected_subtotal = Decimal::ZERO;
        let mut expected_tax = Decimal::ZERO;
        for input in &inputs {
            let subtotal = round_money(input.quantity * input.unit_price, 2);
            let rate = input.tax_rate.unwrap_or_default();
            expected_subtotal += subtotal;
            expected_tax += round_money(subtotal * rate / Decimal::ONE_HUNDRED, 2);
        }

        let totals = state.totals();
        prop_assert_eq!(totals.subtotal, expected_subtotal);
        prop_assert_eq!(totals.tax_total, expected_tax);
    }

    /// The grand total is exactly subtotal plus tax.
    #[test]
    fn prop_grand_total_is_exact_sum(inputs in prop::collection::vec(item(), 0..20)) {
        let totals = accumulate(&inputs).totals();
        prop_assert_eq!(totals.grand_total, totals.subtotal + totals.tax_total);
    }

    /// Every item amount already carries at most two decimals.
    #[test]
    fn prop_item_amounts_are_rounded(input in item()) {
        let state = accumulate(std::slice::from_ref(&input));
        let item = &state.items()[0];
        prop_assert!(item.subtotal().scale() <= 2);
        prop_assert!(item.tax().scale() <= 2);
    }

    /// Reversing the declarations leaves the totals unchanged but reverses the rows.
    #[test]
    fn prop_order_changes_rows_not_totals(inputs in prop::collection::vec(item(), 1..20)) {
        let forward = accumulate(&inputs);
        let reversed_inputs: Vec<_> = inputs.iter().rev().cloned().collect();
        let backward = accumulate(&reversed_inputs);

        prop_assert_eq!(forward.totals(), backward.totals());

        let forward_labels: Vec<_> = forward.items().iter().map(LineItem::label).collect();
        let declared: Vec<_> = inputs.iter().map(|input| input.label.as_str()).collect();
        prop_assert_eq!(forward_labels, declared);

        let backward_labels: Vec<_> = backward.items().iter().map(LineItem::label).collect();
        let reversed: Vec<_> = reversed_inputs.iter().map(|input| input.label.as_str()).collect();
        prop_assert_eq!(backward_labels, reversed);
    }

    /// A negative quantity never reaches the running totals.
    #[test]
    fn prop_negative_quantity_rejected(
        inputs in prop::collection::vec(item(), 0..10),
        millis in 1i64..1_000_000i64,
    ) {
        let mut state = accumulate(&inputs);
        let before = state.totals();
        let bad = LineItemInput::new("Refund", Decimal::new(-millis, 3), Decimal::ONE);
        prop_assert!(state.add_item(bad).is_err());
        prop_assert_eq!(state.totals(), before);
        prop_assert_eq!(state.items().len(), inputs.len());
    }
}
