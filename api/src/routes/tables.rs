use chrono::Utc;
use rocket::serde::json::Json;
use rocket::State;
use serde::{Deserialize, Serialize};

use super::{created, failure, ok, ApiResult};
use crate::models::table::{OrderLine, Table};
use crate::repository::Stores;
use crate::services::order_lifecycle::{PaymentPreview, PaymentRequest, ProductSelection};
use crate::services::table_service::{self, NewTable, SavedPayment, TableSummary};

#[derive(Deserialize, Serialize, Debug)]
pub struct AddToOrderRequest {
    pub selections: Vec<ProductSelection>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ReplaceOrdersRequest {
    pub orders: Vec<OrderLine>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct AdjustLineRequest {
    pub delta: i64,
}

#[get("/tables")]
pub async fn get_all_tables(stores: &State<Stores>) -> ApiResult<Vec<TableSummary>> {
    match table_service::list_tables(stores).await {
        Ok(tables) => ok(tables),
        Err(e) => failure(e),
    }
}

#[post("/tables", format = "json", data = "<new_table>")]
pub async fn add_table(stores: &State<Stores>, new_table: Json<NewTable>) -> ApiResult<Table> {
    match table_service::create_table(stores, new_table.into_inner()).await {
        Ok(table) => created(table),
        Err(e) => failure(e),
    }
}

#[get("/tables/<table_id>")]
pub async fn get_table(stores: &State<Stores>, table_id: &str) -> ApiResult<Table> {
    match table_service::get_table(stores, table_id).await {
        Ok(table) => ok(table),
        Err(e) => failure(e),
    }
}

#[post("/tables/<table_id>/orders", format = "json", data = "<request>")]
pub async fn add_to_order(
    stores: &State<Stores>,
    table_id: &str,
    request: Json<AddToOrderRequest>,
) -> ApiResult<Table> {
    match table_service::add_to_order(stores, table_id, &request.selections).await {
        Ok(table) => ok(table),
        Err(e) => failure(e),
    }
}

#[put("/tables/<table_id>/orders", format = "json", data = "<request>")]
pub async fn replace_orders(
    stores: &State<Stores>,
    table_id: &str,
    request: Json<ReplaceOrdersRequest>,
) -> ApiResult<Table> {
    match table_service::replace_orders(stores, table_id, request.into_inner().orders).await {
        Ok(table) => ok(table),
        Err(e) => failure(e),
    }
}

#[patch("/tables/<table_id>/orders/<index>", format = "json", data = "<request>")]
pub async fn adjust_order_line(
    stores: &State<Stores>,
    table_id: &str,
    index: usize,
    request: Json<AdjustLineRequest>,
) -> ApiResult<Table> {
    match table_service::adjust_order_line(stores, table_id, index, request.delta).await {
        Ok(table) => ok(table),
        Err(e) => failure(e),
    }
}

#[get("/tables/<table_id>/payment")]
pub async fn begin_payment(stores: &State<Stores>, table_id: &str) -> ApiResult<PaymentPreview> {
    match table_service::begin_payment(stores, table_id).await {
        Ok(preview) => ok(preview),
        Err(e) => failure(e),
    }
}

#[post("/tables/<table_id>/payment", format = "json", data = "<request>")]
pub async fn save_payment(
    stores: &State<Stores>,
    table_id: &str,
    request: Json<PaymentRequest>,
) -> ApiResult<SavedPayment> {
    match table_service::save_payment(stores, table_id, &request, Utc::now()).await {
        Ok(saved) => ok(saved),
        Err(e) => failure(e),
    }
}
