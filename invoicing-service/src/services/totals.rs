//! Invoice totals calculator.
//!
//! All arithmetic stays in `Decimal` with no intermediate rounding; display
//! rounding belongs to the presentation edges. Stored figures can never go
//! negative: per-line discounts clamp at the line base and the grand total
//! clamps at zero.

use crate::models::DraftLineItem;
use rust_decimal::Decimal;

/// Per-line computation breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTotals {
    pub base: Decimal,
    pub after_discount: Decimal,
    pub tax: Decimal,
    pub line_total: Decimal,
}

/// Aggregate figures for a whole invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub lines: Vec<LineTotals>,
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
}

/// Compute one line.
///
/// The discount applies before tax and clamps at the line base, so tax is
/// charged on the discounted amount and never on a negative one.
pub fn line_totals(qty: Decimal, rate: Decimal, tax_percent: Decimal, discount: Decimal) -> LineTotals {
    let base = qty * rate;
    let after_discount = (base - discount).max(Decimal::ZERO);
    let tax = after_discount * tax_percent / Decimal::ONE_HUNDRED;
    LineTotals {
        base,
        after_discount,
        tax,
        line_total: after_discount + tax,
    }
}

/// Compute all lines and the invoice aggregates.
///
/// `subtotal` and `discount_total` accumulate the raw base and raw discount
/// even when a per-line clamp engaged, which is why the grand total needs
/// its own clamp at zero.
pub fn calculate(items: &[DraftLineItem]) -> InvoiceTotals {
    let lines: Vec<LineTotals> = items
        .iter()
        .map(|i| line_totals(i.qty, i.rate, i.tax_percent, i.discount))
        .collect();

    let subtotal: Decimal = lines.iter().map(|l| l.base).sum();
    let discount_total: Decimal = items.iter().map(|i| i.discount).sum();
    let tax_total: Decimal = lines.iter().map(|l| l.tax).sum();
    let grand_total = (subtotal - discount_total + tax_total).max(Decimal::ZERO);

    InvoiceTotals {
        lines,
        subtotal,
        discount_total,
        tax_total,
        grand_total,
    }
}
