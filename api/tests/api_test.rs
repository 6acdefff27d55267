use std::str::FromStr;

use cafe_api::repository::Stores;
use chrono::Utc;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use rust_decimal::Decimal;
use serde_json::{json, Value};

async fn client() -> Client {
    Client::tracked(cafe_api::rocket_with(Stores::memory()))
        .await
        .expect("valid rocket instance")
}

async fn send(client: &Client, method: &str, uri: &str, body: Option<Value>) -> (Status, Value) {
    let request = match method {
        "GET" => client.get(uri),
        "POST" => client.post(uri),
        "PUT" => client.put(uri),
        "PATCH" => client.patch(uri),
        other => panic!("unsupported method {}", other),
    };
    let request = match body {
        Some(body) => request.header(ContentType::JSON).body(body.to_string()),
        None => request,
    };

    let response = request.dispatch().await;
    let status = response.status();
    let body = response.into_json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

fn money(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("not a money value: {}", other),
    }
}

async fn add_product(client: &Client, name: &str, price: Value) -> String {
    let (status, body) = send(client, "POST", "/products", Some(json!({ "name": name, "price": price }))).await;
    assert_eq!(status, Status::Created);
    body["result"]["id"].as_str().unwrap().to_string()
}

async fn add_table(client: &Client, number: &str) -> String {
    let (status, body) = send(client, "POST", "/tables", Some(json!({ "tableNumber": number }))).await;
    assert_eq!(status, Status::Created);
    assert_eq!(body["result"]["orders"], json!([]));
    body["result"]["id"].as_str().unwrap().to_string()
}

#[rocket::async_test]
async fn full_table_lifecycle() {
    let client = client().await;
    let tea = add_product(&client, "Tea", json!(10)).await;
    let cake = add_product(&client, "Cake", json!("45.5")).await;
    let table = add_table(&client, "1").await;

    let uri = format!("/tables/{}/orders", table);
    let (status, body) = send(&client, "POST", &uri, Some(json!({
        "selections": [
            { "productId": tea, "quantity": 2 },
            { "productId": cake, "quantity": 0 }
        ]
    })))
    .await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["result"]["orders"].as_array().unwrap().len(), 1);

    let (_, body) = send(&client, "POST", &uri, Some(json!({
        "selections": [
            { "productId": tea, "quantity": 1 },
            { "productId": cake, "quantity": 1 }
        ]
    })))
    .await;
    let orders = body["result"]["orders"].as_array().unwrap().clone();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["name"], "Tea");
    assert_eq!(orders[0]["quantity"], 3);
    assert_eq!(orders[1]["name"], "Cake");

    // quantity is clamped at one
    let (status, body) = send(&client, "PATCH", &format!("{}/1", uri), Some(json!({ "delta": -3 }))).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["result"]["orders"][1]["quantity"], 1);

    let payment_uri = format!("/tables/{}/payment", table);
    let (status, body) = send(&client, "GET", &payment_uri, None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(money(&body["result"]["total"]), Decimal::new(755, 1));
    assert_eq!(body["result"]["newOrder"], false);

    let (_, listed) = send(&client, "GET", "/tables", None).await;
    assert_eq!(listed["result"][0]["paymentDue"], true);
    assert_eq!(listed["result"][0]["orderStatus"], "Running Order");

    let (status, body) = send(&client, "POST", &payment_uri, Some(json!({
        "method": "UPI",
        "status": "Due",
        "responsible": ""
    })))
    .await;
    assert_eq!(status, Status::BadRequest);
    assert!(body["message"].as_str().unwrap().contains("responsible person"));

    let (_, unchanged) = send(&client, "GET", &format!("/tables/{}", table), None).await;
    assert_eq!(unchanged["result"]["orders"].as_array().unwrap().len(), 2);
    assert_eq!(unchanged["result"]["orderHistory"], json!([]));

    let (status, body) = send(&client, "POST", &payment_uri, Some(json!({
        "method": "UPI",
        "status": "Due",
        "responsible": "Asha"
    })))
    .await;
    assert_eq!(status, Status::Ok);
    let saved = &body["result"]["table"];
    assert_eq!(saved["orders"], json!([]));
    assert_eq!(saved["orderHistory"].as_array().unwrap().len(), 1);
    assert_eq!(saved["orderHistory"][0]["orders"].as_array().unwrap().len(), 2);
    assert_eq!(money(&saved["orderHistory"][0]["payment"]["total"]), Decimal::new(755, 1));
    assert_eq!(saved["orderHistory"][0]["payment"]["responsible"], "Asha");
    assert_eq!(saved["orderStatus"], "Payment Due Successfully by Asha");
    assert_eq!(saved["payment"]["method"], "UPI");

    let (_, report) = send(&client, "GET", "/reports/payments", None).await;
    assert_eq!(report["result"]["count"], 1);
    assert_eq!(money(&report["result"]["totalsByMethod"]["UPI"]), Decimal::new(755, 1));
    assert_eq!(money(&report["result"]["totalsByMethod"]["Cash"]), Decimal::ZERO);
    assert_eq!(report["result"]["entries"][0]["tableNumber"], "1");

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let (_, report) = send(&client, "GET", &format!("/reports/payments?from={}&to={}", today, today), None).await;
    assert_eq!(report["result"]["count"], 1);

    let (_, report) = send(&client, "GET", "/reports/payments?from=2999-01-01", None).await;
    assert_eq!(report["result"]["count"], 0);
    assert_eq!(money(&report["result"]["grandTotal"]), Decimal::ZERO);

    let (_, orders_report) = send(&client, "GET", "/reports/orders", None).await;
    assert_eq!(orders_report["result"][0]["current"], json!([]));
    assert_eq!(orders_report["result"][0]["history"].as_array().unwrap().len(), 1);
}

#[rocket::async_test]
async fn settle_example_from_a_single_tea_order() {
    let client = client().await;
    let tea = add_product(&client, "Tea", json!(10)).await;
    let table = add_table(&client, "Counter 2").await;

    send(&client, "POST", &format!("/tables/{}/orders", table), Some(json!({
        "selections": [{ "productId": tea, "quantity": 2 }]
    })))
    .await;

    let (status, body) = send(&client, "POST", &format!("/tables/{}/payment", table), Some(json!({
        "method": "Cash",
        "status": "Settled"
    })))
    .await;
    assert_eq!(status, Status::Ok);
    assert_eq!(money(&body["result"]["entry"]["payment"]["total"]), Decimal::from(20));
    assert_eq!(body["result"]["entry"]["payment"]["method"], "Cash");
    assert_eq!(body["result"]["entry"]["payment"]["responsible"], Value::Null);
    assert_eq!(body["result"]["table"]["orders"], json!([]));

    // an empty table can still be paid, for zero
    let (status, body) = send(&client, "POST", &format!("/tables/{}/payment", table), Some(json!({
        "method": "Card",
        "status": "Settled"
    })))
    .await;
    assert_eq!(status, Status::Ok);
    assert_eq!(money(&body["result"]["entry"]["payment"]["total"]), Decimal::ZERO);
    assert_eq!(body["result"]["table"]["orderHistory"].as_array().unwrap().len(), 2);
}

#[rocket::async_test]
async fn validation_and_missing_resources() {
    let client = client().await;
    let table = add_table(&client, "5").await;

    let (status, body) = send(&client, "POST", &format!("/tables/{}/orders", table), Some(json!({
        "selections": []
    })))
    .await;
    assert_eq!(status, Status::BadRequest);
    assert_eq!(body["message"], "400: Bad Request - No products selected.");

    let (status, _) = send(&client, "POST", &format!("/tables/{}/payment", table), Some(json!({
        "status": "Settled"
    })))
    .await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = send(&client, "POST", &format!("/tables/{}/payment", table), Some(json!({
        "method": "Cheque",
        "status": "Settled"
    })))
    .await;
    assert_eq!(status, Status::UnprocessableEntity);

    let (status, _) = send(&client, "POST", "/tables", Some(json!({ "tableNumber": "  " }))).await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = send(&client, "POST", "/products", Some(json!({ "name": "Tea", "price": -1 }))).await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = send(&client, "GET", "/tables/missing", None).await;
    assert_eq!(status, Status::NotFound);

    let (status, _) = send(&client, "PATCH", &format!("/tables/{}/orders/4", table), Some(json!({ "delta": 1 }))).await;
    assert_eq!(status, Status::NotFound);

    let (status, body) = send(&client, "GET", "/reports/payments?from=yesterday", None).await;
    assert_eq!(status, Status::BadRequest);
    assert!(body["message"].as_str().unwrap().contains("YYYY-MM-DD"));

    let (status, body) = send(&client, "GET", "/nowhere", None).await;
    assert_eq!(status, Status::NotFound);
    assert_eq!(body["message"], "404: '/nowhere' route not found");
}

#[rocket::async_test]
async fn edited_order_list_replaces_the_active_orders() {
    let client = client().await;
    let table = add_table(&client, "9").await;

    let (status, body) = send(&client, "PUT", &format!("/tables/{}/orders", table), Some(json!({
        "orders": [
            { "name": "Coffee", "price": "12.5", "quantity": 0 },
            { "name": "Tea", "price": 10, "quantity": 4 }
        ]
    })))
    .await;
    assert_eq!(status, Status::Ok);
    let orders = body["result"]["orders"].as_array().unwrap();
    assert_eq!(orders[0]["quantity"], 1);
    assert_eq!(orders[1]["quantity"], 4);

    let (_, preview) = send(&client, "GET", &format!("/tables/{}/payment", table), None).await;
    assert_eq!(money(&preview["result"]["total"]), Decimal::new(525, 1));
}

#[rocket::async_test]
async fn preflight_gets_cors_headers() {
    let client = client().await;
    let response = client.options("/tables").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.headers().get_one("Access-Control-Allow-Origin"), Some("*"));
}

#[rocket::async_test]
async fn oversized_orders_are_rejected_and_tables_stay_listable() {
    let client = client().await;
    let (status, _) = send(&client, "POST", "/products", Some(json!({
        "name": "Gold Leaf",
        "price": "10000000000000000000000"
    })))
    .await;
    assert_eq!(status, Status::BadRequest);

    let premium = add_product(&client, "Premium", json!("1000000")).await;
    let table = add_table(&client, "VIP").await;
    let uri = format!("/tables/{}/orders", table);

    let (status, _) = send(&client, "POST", &uri, Some(json!({
        "selections": [{ "productId": premium, "quantity": 100000000 }]
    })))
    .await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = send(&client, "POST", &uri, Some(json!({
        "selections": [{ "productId": premium, "quantity": 9999 }]
    })))
    .await;
    assert_eq!(status, Status::Ok);

    let (status, _) = send(&client, "PATCH", &format!("{}/0", uri), Some(json!({ "delta": 1 }))).await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = send(&client, "PUT", &uri, Some(json!({
        "orders": [{ "name": "Gold Leaf", "price": "10000000000000000000000", "quantity": 100000000 }]
    })))
    .await;
    assert_eq!(status, Status::BadRequest);

    let (status, listed) = send(&client, "GET", "/tables", None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(money(&listed["result"][0]["total"]), Decimal::from(9_999_000_000_i64));

    let (status, _) = send(&client, "GET", "/reports/orders", None).await;
    assert_eq!(status, Status::Ok);

    let (status, preview) = send(&client, "GET", &format!("/tables/{}/payment", table), None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(money(&preview["result"]["total"]), Decimal::from(9_999_000_000_i64));
}

#[rocket::async_test]
async fn store_key_selects_the_backend_and_rejects_unknown_values() {
    let figment = rocket::Config::figment().merge(("store", "memory"));
    let client = Client::tracked(cafe_api::rocket_from(figment))
        .await
        .expect("memory store ignites");
    let (status, body) = send(&client, "GET", "/tables", None).await;
    assert_eq!(status, Status::Ok);
    assert_eq!(body["result"], json!([]));

    let figment = rocket::Config::figment().merge(("store", 42));
    let ignited = Client::tracked(cafe_api::rocket_from(figment)).await;
    assert!(ignited.is_err());
    // rocket::Error panics on drop unless inspected; mark it handled.
    if let Err(e) = ignited {
        let _ = e.kind();
    }
}
