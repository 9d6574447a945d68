//! Async REST client for the kitchen and warehouse backends.
//!
//! # Overview
//! `RequestClient` performs one HTTP call per operation against a fixed base
//! URL and normalizes a known set of error statuses (401, 404, 422, 500, 504)
//! into ordinary values carrying a `status` field. Other failures are
//! returned as `ApiError`.
//!
//! `KitchenService` and `WarehouseService` map named operations onto backend
//! routes. Each owns one client; `Services::from_config` builds both from a
//! `ServiceConfig`, usually read once with `ServiceConfig::from_env`.
//!
//! # Design
//! - Clients are immutable after construction and cheap to clone.
//! - `build_request` and `normalize` are pure and public, so the I/O
//!   boundary stays explicit and the status policy is testable offline.
//! - No retries, timeouts, caching or authentication are layered on top of
//!   the transport.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod kitchen;
pub mod types;
pub mod warehouse;

pub use client::{is_recognized_status, normalize, recovered_status, RequestClient, RECOGNIZED_STATUSES};
pub use config::{ClientConfig, RequestConfig, ServiceConfig};
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use kitchen::KitchenService;
pub use types::{GenerateOrder, DEFAULT_NUMBER_OF_DISHES};
pub use warehouse::WarehouseService;

/// One service per backend, built from the same configuration.
#[derive(Debug, Clone)]
pub struct Services {
    pub kitchen: KitchenService,
    pub warehouse: WarehouseService,
}

impl Services {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            kitchen: KitchenService::from_config(config),
            warehouse: WarehouseService::from_config(config),
        }
    }

    /// Read `KITCHEN_BASE_URL` and `WAREHOUSE_BASE_URL` and build both services.
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::from_config(&ServiceConfig::from_env()?))
    }
}
