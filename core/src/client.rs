//! Generic REST client with status normalization.
//!
//! # Design
//! `RequestClient` holds a `ClientConfig`, the header set derived from it,
//! and a shared reqwest transport. Nothing is mutated after construction, so
//! one instance can serve concurrent calls. Each call goes through three
//! steps:
//! - `build_request` merges the per-call `RequestConfig` into an `HttpRequest`
//! - `execute` performs the round-trip and captures an `HttpResponse`
//! - `normalize` applies the status policy
//!
//! A response whose status is 401, 404, 422, 500 or 504 is not an error here:
//! its decoded body comes back as a value with a `status` field added. Any
//! other non-2xx status, and any failure without a response, is an `ApiError`.

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{ClientConfig, RequestConfig};
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Error statuses handed back to the caller as ordinary values.
pub const RECOGNIZED_STATUSES: [u16; 5] = [401, 404, 422, 500, 504];

pub fn is_recognized_status(status: u16) -> bool {
    RECOGNIZED_STATUSES.contains(&status)
}

/// Status of a recovered error value produced by `normalize`.
///
/// A successful body that itself carries a numeric `status` equal to one of
/// the recognized codes is indistinguishable from a recovered error.
pub fn recovered_status(value: &Value) -> Option<u16> {
    value
        .get("status")?
        .as_u64()
        .and_then(|s| u16::try_from(s).ok())
        .filter(|s| is_recognized_status(*s))
}

/// Turn a raw response into the value returned to callers.
///
/// - 204: empty object, whatever the body says.
/// - other 2xx: the decoded body, untouched. Bodies that are not JSON come
///   back as a JSON string.
/// - recognized error status: the decoded body object with `status` set.
/// - anything else: `ApiError::HttpError` carrying the response as received.
pub fn normalize(response: HttpResponse) -> ApiResult<Value> {
    if response.is_success() {
        if response.status == 204 {
            return Ok(Value::Object(Map::new()));
        }
        return Ok(decode_body(&response.body));
    }

    if is_recognized_status(response.status) {
        let mut fields = match decode_body(&response.body) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        fields.insert("status".to_string(), Value::from(response.status));
        return Ok(Value::Object(fields));
    }

    Err(ApiError::HttpError {
        status: response.status,
        headers: response.headers,
        body: response.body,
    })
}

fn decode_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Put `body` under `data`, keeping every other field of `config`.
fn with_body<B: Serialize + ?Sized>(config: Option<RequestConfig>, body: &B) -> ApiResult<RequestConfig> {
    let mut config = config.unwrap_or_default();
    config.data = Some(serde_json::to_value(body)?);
    Ok(config)
}

/// REST client bound to one base URL.
#[derive(Debug, Clone)]
pub struct RequestClient {
    config: ClientConfig,
    headers: Vec<(String, String)>,
    http: Client,
}

impl RequestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    pub fn with_content_type(base_url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(base_url).with_content_type(content_type))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Build a client on top of an existing reqwest transport.
    ///
    /// A trailing `/` on the base URL is dropped so that `base/` and `base`
    /// join the same way with paths that start with `/`.
    pub fn with_http_client(mut config: ClientConfig, http: Client) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let headers = config.default_headers();
        Self { config, headers, http }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub async fn get(&self, path: &str, config: Option<RequestConfig>) -> ApiResult<Value> {
        self.request(path, HttpMethod::Get, config.unwrap_or_default()).await
    }

    /// `body` always wins over any `data` already present in `config`.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> ApiResult<Value> {
        self.request(path, HttpMethod::Post, with_body(config, body)?).await
    }

    /// `body` always wins over any `data` already present in `config`.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: Option<RequestConfig>,
    ) -> ApiResult<Value> {
        self.request(path, HttpMethod::Put, with_body(config, body)?).await
    }

    pub async fn delete(&self, path: &str, config: Option<RequestConfig>) -> ApiResult<Value> {
        self.request(path, HttpMethod::Delete, config.unwrap_or_default()).await
    }

    /// Issue one request and normalize its outcome.
    pub async fn request(&self, path: &str, method: HttpMethod, config: RequestConfig) -> ApiResult<Value> {
        let request = self.build_request(path, method, &config);
        let url = request.url.clone();
        debug!(method = method.as_str(), url = %url, "issuing request");

        let response = self.execute(request).await?;
        let status = response.status;
        let value = normalize(response)?;
        if is_recognized_status(status) {
            debug!(status, url = %url, "recovered error response");
        }
        Ok(value)
    }

    /// Describe the request for `path` without sending it.
    ///
    /// Per-call headers replace defaults of the same name (compared
    /// case-insensitively) and are appended otherwise. A string `data` is
    /// sent verbatim; any other value is sent as JSON.
    pub fn build_request(&self, path: &str, method: HttpMethod, config: &RequestConfig) -> HttpRequest {
        let mut headers = self.headers.clone();
        for (name, value) in &config.headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(existing) => existing.1 = value.clone(),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        let body = config.data.as_ref().map(|data| match data {
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        });

        HttpRequest {
            method,
            url: format!("{}{}", self.config.base_url, path),
            headers,
            query: config.query.clone(),
            body,
        }
    }

    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = self.http.request(request.method.into(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned()))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse { status, headers, body })
    }
}
