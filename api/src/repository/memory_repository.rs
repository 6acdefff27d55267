//! In-process stores with the same semantics as the MongoDB repositories.
//! Used by the test suite and by `store = "memory"` local runs.

use tokio::sync::RwLock;

use super::{ProductStore, TableStore};
use crate::error::StoreResult;
use crate::models::product::Product;
use crate::models::table::{HistoryEntry, OrderLine, Payment, Table};

#[derive(Default)]
pub struct MemoryTableRepository {
    tables: RwLock<Vec<Table>>,
}

#[rocket::async_trait]
impl TableStore for MemoryTableRepository {
    async fn add_table(&self, table: &Table) -> StoreResult<()> {
        self.tables.write().await.push(table.clone());
        Ok(())
    }

    async fn find_table_by_id(&self, table_id: &str) -> StoreResult<Option<Table>> {
        let tables = self.tables.read().await;
        Ok(tables.iter().find(|t| t.id == table_id).cloned())
    }

    async fn get_all_tables(&self) -> StoreResult<Vec<Table>> {
        Ok(self.tables.read().await.clone())
    }

    async fn update_orders(&self, table_id: &str, orders: &[OrderLine]) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.iter_mut().find(|t| t.id == table_id) {
            Some(table) => {
                table.orders = orders.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_payment(
        &self,
        table_id: &str,
        entry: &HistoryEntry,
        order_status: &str,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.iter_mut().find(|t| t.id == table_id) {
            Some(table) => {
                table.payment = Some(Payment::from(&entry.payment));
                table.orders.clear();
                table.order_status = Some(order_status.to_string());
                table.order_history.push(entry.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

#[rocket::async_trait]
impl ProductStore for MemoryProductRepository {
    async fn add_product(&self, product: &Product) -> StoreResult<()> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn get_all_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }
}
