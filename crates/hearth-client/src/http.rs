//! `reqwest`-backed dispatcher.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use hearth_shared::constants::{CONTENT_TYPE_JSON, IDEMPOTENCY_HEADER};
use hearth_shared::TransportError;

use crate::config::{ClientConfig, ConfigError};
use crate::dispatcher::{ApiRequest, CancelToken, Dispatcher, Method, RawResponse};

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Dispatches requests over HTTP with a bearer token and a retry policy for reads.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpDispatcher {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ConfigError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    async fn send_once(
        &self,
        request: &ApiRequest,
        url: &str,
    ) -> Result<RawResponse, TransportError> {
        let mut builder = self.http.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
                .body(body.json.clone());
        }
        if let Some(key) = &request.idempotency_key {
            builder = builder.header(IDEMPOTENCY_HEADER, key.as_str());
        }

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify_reqwest_error)?;

        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(
        &self,
        request: &ApiRequest,
        target: &str,
        cancel: &CancelToken,
    ) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, target);
        let mut attempt = 0u32;

        loop {
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                result = self.send_once(request, &url) => result,
            };

            match result {
                Err(err)
                    if request.method.is_retryable()
                        && err.is_transient()
                        && attempt < self.max_retries =>
                {
                    attempt += 1;
                    let delay = self.retry_backoff * attempt;
                    warn!(
                        method = %request.method,
                        path = %target,
                        attempt,
                        error = %err,
                        "Request failed, retrying in {}ms",
                        delay.as_millis()
                    );
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Ok(response) => {
                    debug!(
                        status = response.status,
                        bytes = response.body.len(),
                        "Response received"
                    );
                    return Ok(response);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Map a `reqwest` failure onto the transport taxonomy.
fn classify_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout;
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_lowercase();
        if text.contains("certificate") || text.contains("tls") {
            return TransportError::TlsFailure(cause.to_string());
        }
        source = cause.source();
    }

    TransportError::NetworkUnreachable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_base_url() {
        let config = ClientConfig {
            api_url: "https://api.example.com/".into(),
            api_token: Some("token".into()),
            ..ClientConfig::default()
        };
        let dispatcher = HttpDispatcher::new(&config).unwrap();
        assert_eq!(dispatcher.base_url, "https://api.example.com");
        assert_eq!(dispatcher.max_retries, 2);
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let config = ClientConfig {
            api_token: Some("bad\ntoken".into()),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpDispatcher::new(&config),
            Err(ConfigError::InvalidToken)
        ));
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits() {
        let dispatcher = HttpDispatcher::new(&ClientConfig::default()).unwrap();
        let request = ApiRequest::read("users/self");
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = dispatcher
            .dispatch(&request, "/api/v1/users/self", &cancel)
            .await;
        assert_eq!(result, Err(TransportError::Cancelled));
    }
}
