//! Transport Invoker
//!
//! One HTTP call per user action. Parameters always travel in the query
//! string; no request body is sent, not even for POST/PATCH/DELETE.
//! There is no timeout, no cancellation and no retry: whatever happens is
//! reported once as an [`ApiResult`].

use reqwest::header;
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::request::{PreparedRequest, Service};

/// Outcome of a single call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// 2xx response
    Success { status: u16, payload: Value },
    /// No response, or a non-success status
    Failure(Failure),
}

impl ApiResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success { .. })
    }
}

/// Why a call did not succeed
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub code: FailureCode,
    /// `detail` field of the error payload, when the server sent one
    pub detail: Option<String>,
}

impl Failure {
    /// Server detail, or `fallback` when there is none
    pub fn reason<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail.as_deref().unwrap_or(fallback)
    }
}

/// Failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCode {
    /// No response was obtained from the service
    Network { service: Service },
    /// Response received with an error status
    Http { status: u16 },
}

/// reqwest-backed transport bound to an [`ApiConfig`]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("javer-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL for a request, query string included
    pub fn url_for(&self, request: &PreparedRequest) -> Result<Url> {
        let base = self.config.base_url(request.target.service);
        let mut url = Url::parse(base)?;

        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base URL cannot take a path: {}", base)))?
            .pop_if_empty()
            .extend(&request.target.segments);

        if !request.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.params.query_pairs());
        }

        Ok(url)
    }

    /// Issue the call.
    ///
    /// Only a malformed base URL is an `Err`; every network or HTTP
    /// outcome comes back as an [`ApiResult`].
    pub async fn invoke(&self, request: &PreparedRequest) -> Result<ApiResult> {
        let service = request.target.service;
        let url = self.url_for(request)?;

        tracing::info!(form = %request.form, method = %request.target.method, %url, "dispatching");

        let response = match self
            .http
            .request(request.target.method.clone(), url)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(form = %request.form, %service, error = %e, "service unreachable");
                return Ok(network_failure(service));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(form = %request.form, %service, error = %e, "response body lost");
                return Ok(network_failure(service));
            }
        };
        let payload = parse_payload(&body);

        if status.is_success() {
            tracing::debug!(form = %request.form, status = status.as_u16(), "request succeeded");
            return Ok(ApiResult::Success {
                status: status.as_u16(),
                payload,
            });
        }

        let detail = extract_detail(&payload);
        tracing::warn!(
            form = %request.form,
            status = status.as_u16(),
            detail = detail.as_deref().unwrap_or("-"),
            "request failed"
        );
        Ok(ApiResult::Failure(Failure {
            code: FailureCode::Http {
                status: status.as_u16(),
            },
            detail,
        }))
    }
}

fn network_failure(service: Service) -> ApiResult {
    ApiResult::Failure(Failure {
        code: FailureCode::Network { service },
        detail: None,
    })
}

/// JSON when possible, text otherwise, `null` for an empty body
fn parse_payload(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// `detail` of an error payload. Validation errors carry a list there,
/// which is kept as compact JSON.
fn extract_detail(payload: &Value) -> Option<String> {
    match payload.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
