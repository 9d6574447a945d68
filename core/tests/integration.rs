//! Services and client against the live mock backend.
//!
//! # Design
//! Each test starts the mock server on a random port and drives the public
//! API over real HTTP, so the status policy is checked end-to-end with the
//! transport in the loop.

use restaurant_api::{
    recovered_status, ApiError, ClientConfig, KitchenService, RequestClient, RequestConfig, ServiceConfig,
    Services, WarehouseService, DEFAULT_NUMBER_OF_DISHES,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

async fn kitchen() -> KitchenService {
    KitchenService::new(RequestClient::new(spawn_server().await))
}

// --- kitchen ---

#[tokio::test]
async fn generate_order_returns_created_order() {
    let kitchen = kitchen().await;

    let order = kitchen.generate_order(3).await.unwrap();
    assert_eq!(order["id"], 1);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["dishes"].as_array().unwrap().len(), 3);
    assert_eq!(recovered_status(&order), None);
}

#[tokio::test]
async fn generate_order_with_default_count() {
    let kitchen = kitchen().await;

    let order = kitchen.generate_default_order().await.unwrap();
    assert_eq!(order["dishes"].as_array().unwrap().len() as u32, DEFAULT_NUMBER_OF_DISHES);
}

#[tokio::test]
async fn generate_order_validation_failure_is_recovered() {
    let kitchen = kitchen().await;

    let result = kitchen.generate_order(0).await.unwrap();
    assert_eq!(result["status"], 422);
    assert!(result["errors"]["number_dishes"].is_array());
    assert_eq!(recovered_status(&result), Some(422));
}

#[tokio::test]
async fn show_unknown_order_is_recovered_not_found() {
    let kitchen = kitchen().await;

    let result = kitchen.show_order_data("abc-123").await.unwrap();
    assert_eq!(result, json!({ "message": "not found", "status": 404 }));
}

#[tokio::test]
async fn base_url_with_trailing_slash_reaches_routes() {
    let kitchen = KitchenService::new(RequestClient::new(format!("{}/", spawn_server().await)));

    let dishes = kitchen.get_dishes_data().await.unwrap();
    assert_eq!(recovered_status(&dishes), None);
    assert_eq!(dishes.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn order_lifecycle() {
    let kitchen = kitchen().await;

    let orders = kitchen.get_orders_data().await.unwrap();
    assert_eq!(orders, json!([]));

    let created = kitchen.generate_order(2).await.unwrap();
    let uuid = created["uuid"].as_str().unwrap().to_string();

    let fetched = kitchen.show_order_data(&uuid).await.unwrap();
    assert_eq!(fetched, created);

    let orders = kitchen.get_orders_data().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let dishes = kitchen.get_dishes_data().await.unwrap();
    assert_eq!(dishes.as_array().unwrap().len(), 3);
}

// --- warehouse ---

#[tokio::test]
async fn warehouse_lists_stock_and_purchases() {
    let warehouse = WarehouseService::new(RequestClient::new(spawn_server().await));

    let ingredients = warehouse.get_ingredients_data().await.unwrap();
    assert_eq!(ingredients.as_array().unwrap().len(), 7);
    assert_eq!(ingredients[0], json!({ "name": "tomato", "quantity": 5 }));

    let history = warehouse.get_purchase_history_data().await.unwrap();
    assert_eq!(history, json!([{ "ingredient": "tomato", "quantity": 3 }]));
}

#[tokio::test]
async fn services_from_config_share_nothing_but_settings() {
    let kitchen_url = spawn_server().await;
    let warehouse_url = spawn_server().await;
    let config = ServiceConfig::from_lookup(|name| match name {
        "KITCHEN_BASE_URL" => Some(kitchen_url.clone()),
        "WAREHOUSE_BASE_URL" => Some(warehouse_url.clone()),
        _ => None,
    })
    .unwrap();

    let services = Services::from_config(&config);
    assert_eq!(services.kitchen.client().base_url(), kitchen_url);
    assert_eq!(services.warehouse.client().base_url(), warehouse_url);

    services.kitchen.generate_order(1).await.unwrap();
    let orders = services.kitchen.get_orders_data().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);
    let ingredients = services.warehouse.get_ingredients_data().await.unwrap();
    assert!(ingredients.is_array());
}

// --- status policy ---

#[tokio::test]
async fn recognized_statuses_resolve_with_status_field() {
    let client = RequestClient::new(spawn_server().await);

    for status in [401u16, 404, 422, 500, 504] {
        let value = client.get(&format!("/debug/status/{status}"), None).await.unwrap();
        assert_eq!(value["status"], status, "status {status}");
        assert!(value["message"].is_string(), "status {status}");
    }
}

#[tokio::test]
async fn other_statuses_are_raised() {
    let client = RequestClient::new(spawn_server().await);

    for status in [400u16, 403, 503] {
        let err = client.get(&format!("/debug/status/{status}"), None).await.unwrap_err();
        match err {
            ApiError::HttpError { status: s, body, .. } => {
                assert_eq!(s, status);
                let body: Value = serde_json::from_str(&body).unwrap();
                assert!(body["message"].is_string());
            }
            other => panic!("status {status}: unexpected error {other:?}"),
        }
    }
}

#[tokio::test]
async fn no_content_resolves_to_empty_object() {
    let client = RequestClient::new(spawn_server().await);

    let value = client.get("/debug/status/204", None).await.unwrap();
    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn connection_failure_is_raised() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RequestClient::new(format!("http://{addr}"));
    let err = client.get("/api/orders", None).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}

// --- request shaping ---

#[tokio::test]
async fn default_headers_are_sent() {
    let client = RequestClient::new(spawn_server().await);

    let echo = client.get("/debug/echo", None).await.unwrap();
    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["headers"]["cache-control"], "no-cache");
    assert_eq!(echo["headers"]["expires"], "0");
    assert_eq!(echo["headers"]["content-type"], "application/json");
    assert_eq!(echo["headers"]["accept"], "application/json");
    assert_eq!(echo["body"], Value::Null);
}

#[tokio::test]
async fn non_json_client_accepts_anything() {
    let config = ClientConfig::new(spawn_server().await).with_content_type("text/plain");
    let client = RequestClient::from_config(config);

    let echo = client.get("/debug/echo", None).await.unwrap();
    assert_eq!(echo["headers"]["content-type"], "text/plain");
    assert_eq!(echo["headers"]["accept"], "*/*");
}

#[tokio::test]
async fn post_body_wins_and_config_survives() {
    let client = RequestClient::new(spawn_server().await);
    let config = RequestConfig::new()
        .header("x-custom", "kept")
        .query("page", "2")
        .data(json!({ "from": "config" }));

    let echo = client
        .post("/debug/echo", &json!({ "from": "body" }), Some(config))
        .await
        .unwrap();
    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["body"], json!({ "from": "body" }));
    assert_eq!(echo["headers"]["x-custom"], "kept");
    assert_eq!(echo["query"]["page"], "2");
}

#[tokio::test]
async fn put_and_delete_use_their_methods() {
    let client = RequestClient::new(spawn_server().await);

    let config = RequestConfig::new()
        .header("x-custom", "kept")
        .query("page", "3")
        .data(json!({ "from": "config" }));
    let echo = client.put("/debug/echo", &json!({ "n": 1 }), Some(config)).await.unwrap();
    assert_eq!(echo["method"], "PUT");
    assert_eq!(echo["body"], json!({ "n": 1 }));
    assert_eq!(echo["headers"]["x-custom"], "kept");
    assert_eq!(echo["query"]["page"], "3");

    let echo = client.delete("/debug/echo", None).await.unwrap();
    assert_eq!(echo["method"], "DELETE");
    assert_eq!(echo["body"], Value::Null);
}

#[tokio::test]
async fn cloned_client_serves_concurrent_calls() {
    let kitchen = kitchen().await;
    let other = kitchen.clone();

    let (a, b) = tokio::join!(kitchen.get_dishes_data(), other.get_dishes_data());
    assert_eq!(a.unwrap(), b.unwrap());
}
