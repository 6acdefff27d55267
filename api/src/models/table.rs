// models/table.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const RUNNING_ORDER: &str = "Running Order";
pub const NEW_ORDER: &str = "New Order";

/// Largest unit price accepted into the catalog or onto an order line.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Largest quantity a single order line may reach.
pub const MAX_QUANTITY: u32 = 9_999;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,
    pub table_number: String,
    #[serde(default)]
    pub orders: Vec<OrderLine>,
    #[serde(default)]
    pub order_history: Vec<HistoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<String>,
}

impl Table {
    pub fn new(id: impl Into<String>, table_number: impl Into<String>) -> Self {
        Table {
            id: id.into(),
            table_number: table_number.into(),
            orders: Vec::new(),
            order_history: Vec::new(),
            payment: None,
            order_status: None,
        }
    }

    /// Σ(price × quantity) over the active orders.
    pub fn current_total(&self) -> Decimal {
        order_total(&self.orders)
    }

    /// Label shown on the table list: a table with active lines is always
    /// "Running Order", otherwise the last stored status wins.
    pub fn display_status(&self) -> String {
        if !self.orders.is_empty() {
            return RUNNING_ORDER.to_string();
        }
        self.order_status
            .clone()
            .unwrap_or_else(|| NEW_ORDER.to_string())
    }
}

/// One product/quantity pairing. Lines are matched by `name`, not by product id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    /// Saturates rather than panics: documents written before prices and
    /// quantities were bounded may still hold out-of-range values.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

pub fn order_total(lines: &[OrderLine]) -> Decimal {
    lines
        .iter()
        .map(OrderLine::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub orders: Vec<OrderLine>,
    pub payment: PaymentRecord,
}

/// Payment as archived in `orderHistory`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_total: Option<Decimal>,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    #[serde(default)]
    pub responsible: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Last payment, stored on the table document itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_total: Option<Decimal>,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    #[serde(default)]
    pub responsible: Option<String>,
}

impl From<&PaymentRecord> for Payment {
    fn from(record: &PaymentRecord) -> Self {
        Payment {
            total: record.total,
            discounted_total: record.discounted_total,
            status: record.status,
            method: record.method,
            responsible: record.responsible.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Upi];
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let method = match *self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
        };
        write!(f, "{}", method)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Settled, // paid on the spot
    Due,     // deferred to a named responsible person
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status = match *self {
            PaymentStatus::Settled => "Settled",
            PaymentStatus::Due => "Due",
        };
        write!(f, "{}", status)
    }
}
