use futures::stream::TryStreamExt;
use mongodb::{Collection, Database};

use super::ProductStore;
use crate::error::StoreResult;
use crate::models::product::Product;

pub struct ProductRepository {
    collection: Collection<Product>,
}

impl ProductRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Product>("products");
        ProductRepository { collection }
    }
}

#[rocket::async_trait]
impl ProductStore for ProductRepository {
    async fn add_product(&self, product: &Product) -> StoreResult<()> {
        self.collection.insert_one(product, None).await?;
        Ok(())
    }

    async fn get_all_products(&self) -> StoreResult<Vec<Product>> {
        let mut cursor = self.collection.find(None, None).await?;
        let mut products = Vec::new();
        while let Some(product) = cursor.try_next().await? {
            products.push(product);
        }
        Ok(products)
    }
}
