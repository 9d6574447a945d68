//! Warehouse backend: ingredient stock and purchase history.

use serde_json::Value;

use crate::client::RequestClient;
use crate::config::ServiceConfig;
use crate::error::ApiResult;

pub const INGREDIENTS_PATH: &str = "/api/ingredients";
pub const PURCHASE_HISTORY_PATH: &str = "/api/purchase/history";

#[derive(Debug, Clone)]
pub struct WarehouseService {
    client: RequestClient,
}

impl WarehouseService {
    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(RequestClient::new(config.warehouse_base_url.clone()))
    }

    pub fn client(&self) -> &RequestClient {
        &self.client
    }

    pub async fn get_ingredients_data(&self) -> ApiResult<Value> {
        self.client.get(INGREDIENTS_PATH, None).await
    }

    pub async fn get_purchase_history_data(&self) -> ApiResult<Value> {
        self.client.get(PURCHASE_HISTORY_PATH, None).await
    }
}
