use rocket::State;

use super::{failure, ok, ApiResult};
use crate::repository::Stores;
use crate::services::report_service::{self, DateRange, PaymentHistoryReport, TableOrdersReport};

#[get("/reports/orders")]
pub async fn orders_report(stores: &State<Stores>) -> ApiResult<Vec<TableOrdersReport>> {
    match report_service::load_orders_report(stores).await {
        Ok(report) => ok(report),
        Err(e) => failure(e),
    }
}

#[get("/reports/payments?<from>&<to>")]
pub async fn payment_report(
    stores: &State<Stores>,
    from: Option<String>,
    to: Option<String>,
) -> ApiResult<PaymentHistoryReport> {
    let range = match DateRange::parse(from.as_deref(), to.as_deref()) {
        Ok(range) => range,
        Err(e) => return failure(e),
    };

    match report_service::load_payment_history(stores, range).await {
        Ok(report) => ok(report),
        Err(e) => failure(e),
    }
}
