use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order_lifecycle::check_price;
use crate::error::{CafeError, CafeResult};
use crate::models::product::Product;
use crate::repository::Stores;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub subcategory: Option<String>,
}

pub async fn create_product(stores: &Stores, new_product: NewProduct) -> CafeResult<Product> {
    let name = new_product.name.trim();
    if name.is_empty() {
        return Err(CafeError::validation("Product name is required"));
    }
    check_price(new_product.price)?;

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        price: new_product.price,
        subcategory: new_product
            .subcategory
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    stores.products.add_product(&product).await?;
    tracing::info!(product_id = %product.id, name = %product.name, "product added");
    Ok(product)
}

pub async fn list_products(stores: &Stores) -> CafeResult<Vec<Product>> {
    Ok(stores.products.get_all_products().await?)
}
