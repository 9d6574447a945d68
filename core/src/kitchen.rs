//! Kitchen backend: orders and dishes.

use serde_json::Value;

use crate::client::RequestClient;
use crate::config::ServiceConfig;
use crate::error::ApiResult;
use crate::types::{GenerateOrder, DEFAULT_NUMBER_OF_DISHES};

pub const ORDERS_PATH: &str = "/api/orders";
pub const DISHES_PATH: &str = "/api/dishes";
pub const STORE_ORDER_PATH: &str = "/api/order/store";

pub fn order_path(uuid: &str) -> String {
    format!("/api/order/{uuid}")
}

/// Named operations of the kitchen API. Every result is the normalized
/// value produced by `RequestClient`.
#[derive(Debug, Clone)]
pub struct KitchenService {
    client: RequestClient,
}

impl KitchenService {
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(RequestClient::new(config.kitchen_base_url.clone()))
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub async fn get_orders_data(&self) -> ApiResult<Value> {
        self.client.get(ORDERS_PATH, None).await
    }

    /// The uuid is inserted into the path as given.
    pub async fn show_order_data(&self, uuid: &str) -> ApiResult<Value> {
        self.client.get(&order_path(uuid), None).await
    }

    pub async fn get_dishes_data(&self) -> ApiResult<Value> {
        self.client.get(DISHES_PATH, None).await
    }

    /// Ask the kitchen to prepare an order of `number_of_dishes` random dishes.
    pub async fn generate_order(&self, number_of_dishes: u32) -> ApiResult<Value> {
        let body = GenerateOrder {
            number_dishes: number_of_dishes,
        };
        self.client.post(STORE_ORDER_PATH, &body, None).await
    }

    /// `generate_order` with `DEFAULT_NUMBER_OF_DISHES`.
    pub async fn generate_default_order(&self) -> ApiResult<Value> {
        self.generate_order(DEFAULT_NUMBER_OF_DISHES).await
    }
}
