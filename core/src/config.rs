//! Client, per-call and environment configuration.
//!
//! # Design
//! `ClientConfig` is fixed when a `RequestClient` is built and derives the
//! default header set. `RequestConfig` is the typed per-call override: extra
//! headers, query pairs and a body. `ServiceConfig` reads the two backend
//! base URLs once, from the process environment or an injected lookup.

use serde_json::Value;

use crate::error::{ApiError, ApiResult};

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub const KITCHEN_BASE_URL_VAR: &str = "KITCHEN_BASE_URL";
pub const WAREHOUSE_BASE_URL_VAR: &str = "WAREHOUSE_BASE_URL";

/// Immutable settings of one `RequestClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub content_type: String,
}

impl ClientConfig {
    /// A trailing `/` on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            content_type: JSON_CONTENT_TYPE.to_string(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn is_json(&self) -> bool {
        self.content_type == JSON_CONTENT_TYPE
    }

    /// Headers sent with every request made through this configuration.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let accept = if self.is_json() { JSON_CONTENT_TYPE } else { "*/*" };
        vec![
            ("cache-control".to_string(), "no-cache".to_string()),
            ("expires".to_string(), "0".to_string()),
            ("content-type".to_string(), self.content_type.clone()),
            ("accept".to_string(), accept.to_string()),
        ]
    }
}

/// Per-call options layered on top of a client's defaults.
///
/// `post` and `put` always replace `data` with their body argument; the
/// remaining fields are applied as given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub data: Option<Value>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Base URLs of the two backends, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub kitchen_base_url: String,
    pub warehouse_base_url: String,
}

impl ServiceConfig {
    /// Read `KITCHEN_BASE_URL` and `WAREHOUSE_BASE_URL` from the environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env` but resolves variables through `lookup`.
    ///
    /// Values are taken as-is: an empty string is a valid (if useless) base
    /// URL and fails later at the transport.
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| lookup(name).ok_or_else(|| ApiError::MissingEnvVar(name.to_string()));
        Ok(Self {
            kitchen_base_url: require(KITCHEN_BASE_URL_VAR)?,
            warehouse_base_url: require(WAREHOUSE_BASE_URL_VAR)?,
        })
    }
}
