//! Request payloads sent to the backends.
//!
//! Responses are returned as `serde_json::Value` and are not modeled here.

use serde::{Deserialize, Serialize};

/// Number of dishes requested when the caller does not choose one.
pub const DEFAULT_NUMBER_OF_DISHES: u32 = 1;

/// Body of `POST /api/order/store`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOrder {
    pub number_dishes: u32,
}

impl Default for GenerateOrder {
    fn default() -> Self {
        Self {
            number_dishes: DEFAULT_NUMBER_OF_DISHES,
        }
    }
}
