// src/repository/table_repository.rs
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::{Collection, Database};

use super::TableStore;
use crate::error::StoreResult;
use crate::models::table::{HistoryEntry, OrderLine, Payment, Table};

pub struct TableRepository {
    collection: Collection<Table>,
}

impl TableRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Table>("tables");
        TableRepository { collection }
    }
}

#[rocket::async_trait]
impl TableStore for TableRepository {
    async fn add_table(&self, table: &Table) -> StoreResult<()> {
        self.collection.insert_one(table, None).await?;
        Ok(())
    }

    async fn find_table_by_id(&self, table_id: &str) -> StoreResult<Option<Table>> {
        let filter = doc! { "id": table_id };
        let table = self.collection.find_one(filter, None).await?;
        Ok(table)
    }

    async fn get_all_tables(&self) -> StoreResult<Vec<Table>> {
        let mut cursor = self.collection.find(None, None).await?;
        let mut tables = Vec::new();
        while let Some(table) = cursor.try_next().await? {
            tables.push(table);
        }
        Ok(tables)
    }

    async fn update_orders(&self, table_id: &str, orders: &[OrderLine]) -> StoreResult<bool> {
        let filter = doc! { "id": table_id };
        let orders_bson = to_bson(orders)?;

        let update = doc! { "$set": { "orders": orders_bson } };
        let result = self.collection.update_one(filter, update, None).await?;
        Ok(result.matched_count > 0)
    }

    async fn record_payment(
        &self,
        table_id: &str,
        entry: &HistoryEntry,
        order_status: &str,
    ) -> StoreResult<bool> {
        let filter = doc! { "id": table_id };
        let update = payment_update(entry, order_status)?;
        let result = self.collection.update_one(filter, update, None).await?;
        Ok(result.matched_count > 0)
    }
}

/// One update that stores the payment, clears the active orders and appends
/// the archived entry, so the document never shows half a payment.
fn payment_update(entry: &HistoryEntry, order_status: &str) -> StoreResult<Document> {
    let payment_bson = to_bson(&Payment::from(&entry.payment))?;
    let entry_bson = to_bson(entry)?;

    Ok(doc! {
        "$set": {
            "payment": payment_bson,
            "orders": Bson::Array(vec![]),
            "orderStatus": order_status,
        },
        "$push": { "orderHistory": entry_bson },
    })
}
