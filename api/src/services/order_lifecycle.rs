//! The order/payment state transition of a table.
//!
//! A table is `Empty` while `orders` is empty and `Active` otherwise. Adding
//! products merges lines by product name; saving a payment archives the
//! whole active list into `orderHistory` and resets it. Everything here is
//! pure: the caller reads the table, applies one of these functions and
//! writes the result back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CafeError, CafeResult};
use crate::models::product::Product;
use crate::models::table::{
    order_total, HistoryEntry, OrderLine, PaymentMethod, PaymentRecord, PaymentStatus, Table, MAX_PRICE,
    MAX_QUANTITY,
};

pub const NO_PRODUCTS_SELECTED: &str = "No products selected.";
pub const METHOD_AND_STATUS_REQUIRED: &str = "Please select a payment method and status";
pub const RESPONSIBLE_REQUIRED: &str = "Please enter the responsible person's name for due payments.";

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProductSelection {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub method: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub discounted_total: Option<Decimal>,
}

/// What the payment dialog shows before anything is saved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPreview {
    pub table_id: String,
    pub table_number: String,
    pub orders: Vec<OrderLine>,
    pub total: Decimal,
    /// No active orders: saving produces a zero-total payment.
    pub new_order: bool,
}

/// A validated payment, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub entry: HistoryEntry,
    pub order_status: String,
}

/// Rejects negative prices and prices above `MAX_PRICE`.
pub fn check_price(price: Decimal) -> CafeResult<()> {
    if price < Decimal::ZERO {
        return Err(CafeError::validation("Price must not be negative"));
    }
    if price > MAX_PRICE {
        return Err(CafeError::validation(format!(
            "Price {} exceeds the maximum of {}",
            price, MAX_PRICE
        )));
    }
    Ok(())
}

fn check_quantity(name: &str, quantity: u64) -> CafeResult<()> {
    if quantity > u64::from(MAX_QUANTITY) {
        return Err(CafeError::validation(format!(
            "Quantity {} of {} exceeds the maximum of {}",
            quantity, name, MAX_QUANTITY
        )));
    }
    Ok(())
}

pub fn check_line(line: &OrderLine) -> CafeResult<()> {
    check_price(line.price)?;
    check_quantity(&line.name, u64::from(line.quantity))
}

/// Adds `quantity` of `product` to the active lines. An existing line with
/// the same name is incremented, otherwise a new line is appended. A line
/// that would pass `MAX_QUANTITY` is left untouched.
pub fn merge_product(orders: &mut Vec<OrderLine>, product: &Product, quantity: u32) -> CafeResult<()> {
    match orders.iter_mut().find(|line| line.name == product.name) {
        Some(line) => {
            let merged = u64::from(line.quantity) + u64::from(quantity);
            check_quantity(&line.name, merged)?;
            line.quantity += quantity;
        }
        None => {
            let line = OrderLine {
                name: product.name.clone(),
                price: product.price,
                quantity,
            };
            check_line(&line)?;
            orders.push(line);
        }
    }
    Ok(())
}

/// Resolves the non-zero selections against the catalog, keeping request order.
pub fn resolve_selections<'a>(
    catalog: &'a [Product],
    selections: &[ProductSelection],
) -> CafeResult<Vec<(&'a Product, u32)>> {
    let mut picked = Vec::new();
    for selection in selections.iter().filter(|s| s.quantity > 0) {
        let product = catalog
            .iter()
            .find(|p| p.id == selection.product_id)
            .ok_or_else(|| CafeError::validation(format!("Unknown product {}", selection.product_id)))?;
        check_quantity(&product.name, u64::from(selection.quantity))?;
        picked.push((product, selection.quantity));
    }

    if picked.is_empty() {
        return Err(CafeError::validation(NO_PRODUCTS_SELECTED));
    }
    Ok(picked)
}

/// Applies resolved selections to a copy of `orders`.
pub fn add_to_order(orders: &[OrderLine], picked: &[(&Product, u32)]) -> CafeResult<Vec<OrderLine>> {
    let mut updated = orders.to_vec();
    for (product, quantity) in picked {
        merge_product(&mut updated, product, *quantity)?;
    }
    Ok(updated)
}

/// An edited order list as saved from the edit view: quantities never drop below one.
pub fn clamp_quantities(orders: Vec<OrderLine>) -> CafeResult<Vec<OrderLine>> {
    orders
        .into_iter()
        .map(|line| {
            let line = OrderLine {
                quantity: line.quantity.max(1),
                ..line
            };
            check_line(&line)?;
            Ok(line)
        })
        .collect()
}

/// `quantity = max(1, quantity + delta)` for the line at `index`.
pub fn adjust_line(orders: &mut [OrderLine], index: usize, delta: i64) -> CafeResult<()> {
    let line = orders
        .get_mut(index)
        .ok_or_else(|| CafeError::NotFound(format!("Order line {} not found", index)))?;

    let adjusted = i64::from(line.quantity).saturating_add(delta).max(1);
    check_quantity(&line.name, adjusted as u64)?;
    line.quantity = adjusted as u32;
    Ok(())
}

pub fn preview(table: &Table) -> PaymentPreview {
    PaymentPreview {
        table_id: table.id.clone(),
        table_number: table.table_number.clone(),
        orders: table.orders.clone(),
        total: table.current_total(),
        new_order: table.orders.is_empty(),
    }
}

/// Validates a payment request against the table's current orders and
/// builds the history entry. Nothing is mutated: a rejected request leaves
/// the table exactly as it was.
pub fn settle(table: &Table, request: &PaymentRequest, now: DateTime<Utc>) -> CafeResult<Settlement> {
    let (method, status) = match (request.method, request.status) {
        (Some(method), Some(status)) => (method, status),
        _ => return Err(CafeError::validation(METHOD_AND_STATUS_REQUIRED)),
    };

    let responsible = match status {
        PaymentStatus::Settled => None,
        PaymentStatus::Due => {
            let name = request
                .responsible
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| CafeError::validation(RESPONSIBLE_REQUIRED))?;
            Some(name.to_string())
        }
    };

    // archived totals must be exact, so out-of-range lines are refused here
    table.orders.iter().try_for_each(check_line)?;
    let total = order_total(&table.orders);
    if let Some(discounted) = request.discounted_total {
        if discounted < Decimal::ZERO || discounted > total {
            return Err(CafeError::validation(format!(
                "Discounted total {} must be between 0 and {}",
                discounted, total
            )));
        }
    }

    let order_status = match &responsible {
        Some(name) => format!("Payment Due Successfully by {}", name),
        None => "Payment Successfully Settled".to_string(),
    };

    Ok(Settlement {
        entry: HistoryEntry {
            orders: table.orders.clone(),
            payment: PaymentRecord {
                total,
                discounted_total: request.discounted_total,
                status,
                method,
                responsible,
                timestamp: now,
            },
        },
        order_status,
    })
}
