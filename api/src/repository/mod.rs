use std::sync::Arc;

use mongodb::Database;

use crate::error::StoreResult;
use crate::models::product::Product;
use crate::models::table::{HistoryEntry, OrderLine, Table};

pub mod memory_repository;
pub mod product_repository;
pub mod table_repository;

use memory_repository::{MemoryProductRepository, MemoryTableRepository};
use product_repository::ProductRepository;
use table_repository::TableRepository;

/// Access to the `tables` collection.
///
/// Writes that target a table return `Ok(false)` when no document matched.
#[rocket::async_trait]
pub trait TableStore: Send + Sync {
    async fn add_table(&self, table: &Table) -> StoreResult<()>;

    async fn find_table_by_id(&self, table_id: &str) -> StoreResult<Option<Table>>;

    async fn get_all_tables(&self) -> StoreResult<Vec<Table>>;

    /// Overwrites the whole active `orders` array.
    async fn update_orders(&self, table_id: &str, orders: &[OrderLine]) -> StoreResult<bool>;

    /// Archives `entry`, clears `orders` and stores the last payment and
    /// status label in one multi-field update.
    async fn record_payment(
        &self,
        table_id: &str,
        entry: &HistoryEntry,
        order_status: &str,
    ) -> StoreResult<bool>;
}

/// Access to the `products` collection.
#[rocket::async_trait]
pub trait ProductStore: Send + Sync {
    async fn add_product(&self, product: &Product) -> StoreResult<()>;

    async fn get_all_products(&self) -> StoreResult<Vec<Product>>;
}

/// Both stores, as managed Rocket state.
#[derive(Clone)]
pub struct Stores {
    pub tables: Arc<dyn TableStore>,
    pub products: Arc<dyn ProductStore>,
}

impl Stores {
    pub fn mongo(db: &Database) -> Self {
        Stores {
            tables: Arc::new(TableRepository::new(db)),
            products: Arc::new(ProductRepository::new(db)),
        }
    }

    pub fn memory() -> Self {
        Stores {
            tables: Arc::new(MemoryTableRepository::default()),
            products: Arc::new(MemoryProductRepository::default()),
        }
    }
}
