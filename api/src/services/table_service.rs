//! Store-backed table operations. Each one reads the table, applies a
//! lifecycle step, writes the result and re-reads the document so callers
//! always render what is actually stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order_lifecycle::{self, PaymentPreview, PaymentRequest, ProductSelection};
use crate::error::{CafeError, CafeResult};
use crate::models::table::{HistoryEntry, OrderLine, Table};
use crate::repository::Stores;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTable {
    pub table_number: String,
}

/// One card on the table list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub id: String,
    pub table_number: String,
    pub line_count: usize,
    pub total: Decimal,
    pub payment_due: bool,
    pub order_status: String,
}

impl From<&Table> for TableSummary {
    fn from(table: &Table) -> Self {
        let total = table.current_total();
        TableSummary {
            id: table.id.clone(),
            table_number: table.table_number.clone(),
            line_count: table.orders.len(),
            total,
            payment_due: total > Decimal::ZERO,
            order_status: table.display_status(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedPayment {
    pub table: Table,
    pub entry: HistoryEntry,
    pub order_status: String,
}

pub async fn create_table(stores: &Stores, new_table: NewTable) -> CafeResult<Table> {
    let table_number = new_table.table_number.trim();
    if table_number.is_empty() {
        return Err(CafeError::validation("Table number is required"));
    }

    let table = Table::new(Uuid::new_v4().to_string(), table_number);
    stores.tables.add_table(&table).await?;
    tracing::info!(table_id = %table.id, table_number = %table.table_number, "table added");
    Ok(table)
}

pub async fn list_tables(stores: &Stores) -> CafeResult<Vec<TableSummary>> {
    let tables = stores.tables.get_all_tables().await?;
    Ok(tables.iter().map(TableSummary::from).collect())
}

pub async fn get_table(stores: &Stores, table_id: &str) -> CafeResult<Table> {
    stores
        .tables
        .find_table_by_id(table_id)
        .await?
        .ok_or_else(|| CafeError::table_not_found(table_id))
}

pub async fn add_to_order(
    stores: &Stores,
    table_id: &str,
    selections: &[ProductSelection],
) -> CafeResult<Table> {
    let table = get_table(stores, table_id).await?;
    let catalog = stores.products.get_all_products().await?;

    let picked = order_lifecycle::resolve_selections(&catalog, selections)?;
    let updated = order_lifecycle::add_to_order(&table.orders, &picked)?;

    write_orders(stores, table_id, &updated).await?;
    tracing::info!(table_id, lines = updated.len(), "products added to order");
    get_table(stores, table_id).await
}

pub async fn replace_orders(stores: &Stores, table_id: &str, orders: Vec<OrderLine>) -> CafeResult<Table> {
    let orders = order_lifecycle::clamp_quantities(orders)?;
    write_orders(stores, table_id, &orders).await?;
    tracing::info!(table_id, lines = orders.len(), "orders updated");
    get_table(stores, table_id).await
}

pub async fn adjust_order_line(stores: &Stores, table_id: &str, index: usize, delta: i64) -> CafeResult<Table> {
    let mut table = get_table(stores, table_id).await?;
    order_lifecycle::adjust_line(&mut table.orders, index, delta)?;

    write_orders(stores, table_id, &table.orders).await?;
    tracing::debug!(table_id, index, delta, "order line adjusted");
    get_table(stores, table_id).await
}

pub async fn begin_payment(stores: &Stores, table_id: &str) -> CafeResult<PaymentPreview> {
    let table = get_table(stores, table_id).await?;
    Ok(order_lifecycle::preview(&table))
}

/// Archives the table's active orders under a payment and clears them.
/// A rejected request writes nothing.
pub async fn save_payment(
    stores: &Stores,
    table_id: &str,
    request: &PaymentRequest,
    now: DateTime<Utc>,
) -> CafeResult<SavedPayment> {
    let table = get_table(stores, table_id).await?;

    let settlement = match order_lifecycle::settle(&table, request, now) {
        Ok(settlement) => settlement,
        Err(e) => {
            tracing::warn!(table_id, error = %e, "payment rejected");
            return Err(e);
        }
    };

    let matched = stores
        .tables
        .record_payment(table_id, &settlement.entry, &settlement.order_status)
        .await?;
    if !matched {
        return Err(CafeError::table_not_found(table_id));
    }

    tracing::info!(
        table_id,
        total = %settlement.entry.payment.total,
        method = %settlement.entry.payment.method,
        status = %settlement.entry.payment.status,
        "payment saved"
    );

    Ok(SavedPayment {
        table: get_table(stores, table_id).await?,
        entry: settlement.entry,
        order_status: settlement.order_status,
    })
}

async fn write_orders(stores: &Stores, table_id: &str, orders: &[OrderLine]) -> CafeResult<()> {
    if stores.tables.update_orders(table_id, orders).await? {
        Ok(())
    } else {
        Err(CafeError::table_not_found(table_id))
    }
}
