use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const MAX_DISHES_PER_ORDER: u64 = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub id: u32,
    pub name: String,
    pub ingredients: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: u64,
    pub uuid: Uuid,
    pub status: String,
    pub dishes: Vec<Dish>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub ingredient: String,
    pub quantity: u32,
}

/// In-memory stand-in for the kitchen and warehouse databases.
#[derive(Debug, Default)]
pub struct Backend {
    pub orders: Vec<Order>,
    pub dishes: Vec<Dish>,
    pub ingredients: Vec<Ingredient>,
    pub purchases: Vec<Purchase>,
}

impl Backend {
    pub fn seeded() -> Self {
        let dish = |id, name: &str, ingredients: &[&str]| Dish {
            id,
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        };
        let stock = |name: &str, quantity| Ingredient {
            name: name.to_string(),
            quantity,
        };
        Self {
            orders: Vec::new(),
            dishes: vec![
                dish(1, "Tomato salad", &["tomato", "onion", "lemon"]),
                dish(2, "Chicken rice", &["chicken", "rice", "onion"]),
                dish(3, "Potato soup", &["potato", "onion", "cheese"]),
            ],
            ingredients: ["tomato", "lemon", "potato", "rice", "onion", "chicken", "cheese"]
                .into_iter()
                .map(|name| stock(name, 5))
                .collect(),
            purchases: vec![Purchase {
                ingredient: "tomato".to_string(),
                quantity: 3,
            }],
        }
    }
}

pub type Db = Arc<RwLock<Backend>>;

pub fn app() -> Router {
    app_with(Backend::seeded())
}

pub fn app_with(backend: Backend) -> Router {
    let db: Db = Arc::new(RwLock::new(backend));
    Router::new()
        .route("/api/orders", get(list_orders))
        .route("/api/order/store", post(store_order))
        .route("/api/order/{uuid}", get(show_order))
        .route("/api/dishes", get(list_dishes))
        .route("/api/ingredients", get(list_ingredients))
        .route("/api/purchase/history", get(purchase_history))
        .route("/debug/echo", any(echo))
        .route("/debug/status/{code}", get(status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_orders(State(db): State<Db>) -> Json<Vec<Order>> {
    Json(db.read().await.orders.clone())
}

async fn show_order(
    State(db): State<Db>,
    Path(uuid): Path<String>,
) -> Result<Json<Order>, (StatusCode, Json<Value>)> {
    let backend = db.read().await;
    backend
        .orders
        .iter()
        .find(|o| o.uuid.to_string() == uuid)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))))
}

async fn store_order(
    State(db): State<Db>,
    Json(input): Json<Value>,
) -> Result<Json<Order>, (StatusCode, Json<Value>)> {
    let count = input
        .get("number_dishes")
        .and_then(Value::as_u64)
        .filter(|n| (1..=MAX_DISHES_PER_ORDER).contains(n))
        .ok_or_else(|| {
            let message = format!("number_dishes must be between 1 and {MAX_DISHES_PER_ORDER}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": { "number_dishes": [message] } })),
            )
        })?;

    let mut backend = db.write().await;
    let id = backend.orders.len() as u64 + 1;
    let dishes = backend
        .dishes
        .iter()
        .cycle()
        .skip(id as usize)
        .take(count as usize)
        .cloned()
        .collect();
    let order = Order {
        id,
        uuid: Uuid::new_v4(),
        status: "pending".to_string(),
        dishes,
    };
    debug!(id, uuid = %order.uuid, count, "order stored");
    backend.orders.push(order.clone());
    Ok(Json(order))
}

async fn list_dishes(State(db): State<Db>) -> Json<Vec<Dish>> {
    Json(db.read().await.dishes.clone())
}

async fn list_ingredients(State(db): State<Db>) -> Json<Vec<Ingredient>> {
    Json(db.read().await.ingredients.clone())
}

async fn purchase_history(State(db): State<Db>) -> Json<Vec<Purchase>> {
    Json(db.read().await.purchases.clone())
}

/// Reflect the request back so callers can inspect what was sent.
async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> Json<Value> {
    let headers: HashMap<String, String> = headers
        .iter()
        .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
        .collect();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "query": query,
        "body": body,
    }))
}

/// Answer with an arbitrary status and a small JSON body.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    let message = status.canonical_reason().unwrap_or("unknown");
    Ok((status, Json(json!({ "message": message }))))
}
