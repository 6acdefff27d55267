//! Read-only aggregation over the `tables` collection.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CafeError, CafeResult};
use crate::models::table::{OrderLine, PaymentMethod, PaymentStatus, Table};
use crate::repository::Stores;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportLine {
    pub quantity: u32,
    pub name: String,
    pub price: Decimal,
    pub line_total: Decimal,
}

impl From<&OrderLine> for ReportLine {
    fn from(line: &OrderLine) -> Self {
        ReportLine {
            quantity: line.quantity,
            name: line.name.clone(),
            price: line.price,
            line_total: line.line_total(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub timestamp: DateTime<Utc>,
    pub lines: Vec<ReportLine>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableOrdersReport {
    pub table_id: String,
    pub table_number: String,
    pub current: Vec<ReportLine>,
    pub history: Vec<HistoryReport>,
    /// Neither active nor archived orders.
    pub no_orders: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub table_number: String,
    pub total: Decimal,
    pub discounted_total: Option<Decimal>,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub responsible: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub orders: Vec<OrderLine>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryReport {
    pub entries: Vec<PaymentRow>,
    pub totals_by_method: BTreeMap<PaymentMethod, Decimal>,
    pub count: usize,
    pub grand_total: Decimal,
}

/// Inclusive range of UTC calendar days; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Parses optional `YYYY-MM-DD` bounds as sent in the report query string.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> CafeResult<Self> {
        let range = DateRange {
            from: from.map(parse_day).transpose()?,
            to: to.map(parse_day).transpose()?,
        };
        if let (Some(from), Some(to)) = (range.from, range.to) {
            if from > to {
                return Err(CafeError::validation(format!("from {} is after to {}", from, to)));
            }
        }
        Ok(range)
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let day = timestamp.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

fn parse_day(raw: &str) -> CafeResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CafeError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

pub fn orders_report(tables: &[Table]) -> Vec<TableOrdersReport> {
    tables
        .iter()
        .map(|table| TableOrdersReport {
            table_id: table.id.clone(),
            table_number: table.table_number.clone(),
            current: table.orders.iter().map(ReportLine::from).collect(),
            history: table
                .order_history
                .iter()
                .map(|entry| HistoryReport {
                    timestamp: entry.payment.timestamp,
                    lines: entry.orders.iter().map(ReportLine::from).collect(),
                })
                .collect(),
            no_orders: table.orders.is_empty() && table.order_history.is_empty(),
        })
        .collect()
}

pub fn payment_history(tables: &[Table], range: DateRange) -> PaymentHistoryReport {
    let entries: Vec<PaymentRow> = tables
        .iter()
        .flat_map(|table| {
            table.order_history.iter().map(move |entry| PaymentRow {
                table_number: table.table_number.clone(),
                total: entry.payment.total,
                discounted_total: entry.payment.discounted_total,
                method: entry.payment.method,
                status: entry.payment.status,
                responsible: entry.payment.responsible.clone(),
                timestamp: entry.payment.timestamp,
                orders: entry.orders.clone(),
            })
        })
        .filter(|row| range.contains(&row.timestamp))
        .collect();

    let mut totals_by_method: BTreeMap<PaymentMethod, Decimal> =
        PaymentMethod::ALL.iter().map(|m| (*m, Decimal::ZERO)).collect();
    for row in &entries {
        let total = totals_by_method.entry(row.method).or_insert(Decimal::ZERO);
        *total = total.saturating_add(row.total);
    }

    PaymentHistoryReport {
        count: entries.len(),
        grand_total: entries
            .iter()
            .map(|row| row.total)
            .fold(Decimal::ZERO, Decimal::saturating_add),
        totals_by_method,
        entries,
    }
}

pub async fn load_orders_report(stores: &Stores) -> CafeResult<Vec<TableOrdersReport>> {
    let tables = stores.tables.get_all_tables().await?;
    Ok(orders_report(&tables))
}

pub async fn load_payment_history(stores: &Stores, range: DateRange) -> CafeResult<PaymentHistoryReport> {
    let tables = stores.tables.get_all_tables().await?;
    Ok(payment_history(&tables, range))
}
