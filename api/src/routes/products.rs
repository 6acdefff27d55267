use rocket::serde::json::Json;
use rocket::State;

use super::{created, failure, ok, ApiResult};
use crate::models::product::Product;
use crate::repository::Stores;
use crate::services::catalog_service::{self, NewProduct};

#[get("/products")]
pub async fn get_all_products(stores: &State<Stores>) -> ApiResult<Vec<Product>> {
    match catalog_service::list_products(stores).await {
        Ok(products) => ok(products),
        Err(e) => failure(e),
    }
}

#[post("/products", format = "json", data = "<new_product>")]
pub async fn add_product(stores: &State<Stores>, new_product: Json<NewProduct>) -> ApiResult<Product> {
    match catalog_service::create_product(stores, new_product.into_inner()).await {
        Ok(product) => created(product),
        Err(e) => failure(e),
    }
}
