//! Derived values recomputed from current inputs before anything is
//! displayed or persisted. Pure functions; the record services and the
//! product listing call through here so totals can never drift from their
//! inputs.

use crate::models::{PaymentStatus, Product};

/// A basket line as selected on the invoice form.
#[derive(Debug, Clone)]
pub struct SelectedProduct<'a> {
    pub product: &'a Product,
    pub quantity: i32,
    pub custom_price: Option<i64>,
}

/// Case-insensitive substring filter over product names. Favorited products
/// sort ahead of the rest; the sort is stable, so order within each group is
/// the input (insertion) order.
pub fn filter_products<'a>(filter: &str, products: &'a [Product]) -> Vec<&'a Product> {
    let pin = filter.to_lowercase();
    let mut matches: Vec<&Product> = products
        .iter()
        .filter(|p| p.product_name.to_lowercase().contains(&pin))
        .collect();
    matches.sort_by_key(|p| !p.favorite);
    matches
}

/// A per-line custom price beats everything; otherwise the generator price
/// applies while the toggle is on and the product defines one; otherwise the
/// base price.
pub fn effective_unit_price(product: &Product, custom_price: Option<i64>, gen_is_on: bool) -> i64 {
    custom_price.unwrap_or(match (gen_is_on, product.gen_price) {
        (true, Some(gen_price)) => gen_price,
        _ => product.price,
    })
}

pub fn basket_total(selection: &[SelectedProduct<'_>], gen_is_on: bool) -> i64 {
    selection
        .iter()
        .map(|line| {
            line.quantity as i64 * effective_unit_price(line.product, line.custom_price, gen_is_on)
        })
        .sum()
}

/// Positive: amount owed. Negative: overpayment. Zero: settled.
pub fn outstanding(total_cost: i64, total_paid: i64) -> i64 {
    total_cost - total_paid
}

/// Paid exactly when the balance is zero. An overpaid record stays Pending
/// so it surfaces for reconciliation.
pub fn payment_status_for(outstanding_balance: i64) -> PaymentStatus {
    if outstanding_balance == 0 {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Pending
    }
}
