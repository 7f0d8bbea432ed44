// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// HTTP client for the practice-management REST API

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth_core::constants::wire;
use crate::auth_core::errors::{ApiError, SessionError};
use crate::auth_core::events::BridgeSignal;
use crate::auth_core::types::Domain;
use crate::bridge::EventBridge;
use crate::config::Config;
use crate::transport::classify::{classify_response, error_for_status};

/// Transport for one domain's API calls.
///
/// Uses a cookie-carrying, pooled client. Every call goes through
/// `request`, which publishes the matching bridge signal before returning
/// the error to the caller.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: String,
    domain: Domain,
    bridge: EventBridge,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        domain: Domain,
        bridge: EventBridge,
        config: &Config,
    ) -> Result<Self, SessionError> {
        let timeout = config.request_timeout();
        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(wire::CONNECT_TIMEOUT_SECS))
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(wire::POOL_IDLE_TIMEOUT_SECS))
            .cookie_store(true)
            .build()
            .map_err(|e| SessionError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            domain,
            bridge,
            timeout,
        })
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn bridge(&self) -> &EventBridge {
        &self.bridge
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.request(Method::GET, path, None).await?;
        decode(body)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        payload: &B,
    ) -> Result<T, ApiError> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| ApiError::Decode(format!("Failed to encode request: {}", e)))?;
        let body = self.request(Method::POST, path, Some(&payload)).await?;
        decode(body)
    }

    /// POST with no payload, ignoring the response body.
    pub async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::POST, path, None).await.map(|_| ())
    }

    /// Send one request and normalise the outcome.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!(domain = %self.domain, method = %method, url = %url, "API request");

        let mut builder = self.http_client.request(method.clone(), &url);
        if let Some(p) = payload {
            builder = builder.json(p);
        }

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                let reason = if e.is_timeout() {
                    format!("Request timeout after {}s", self.timeout.as_secs())
                } else if e.is_connect() {
                    "Connection failed".to_string()
                } else {
                    format!("HTTP request failed: {}", e)
                };
                warn!(domain = %self.domain, url = %url, error = %e, "No response from API");
                self.bridge.publish(BridgeSignal::ConnectivityLost);
                return Err(ApiError::Network(reason));
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(domain = %self.domain, url = %url, error = %e, "Failed to read response body");
            ApiError::Network(format!("Failed to read response: {}", e))
        })?;
        let body = parse_body(&text);

        if status.is_success() {
            return body.map_err(|e| {
                warn!(url = %url, error = %e, "Failed to parse API response");
                ApiError::Decode(format!("Failed to parse response: {}", e))
            });
        }

        let body = body.unwrap_or(Value::Null);
        let code = status.as_u16();
        if let Some(signal) = classify_response(self.domain, code, &body) {
            self.bridge.publish(signal);
        }
        let err = error_for_status(code, &body);
        debug!(domain = %self.domain, status = code, url = %url, error = %err, "API returned error status");
        Err(err)
    }
}

fn parse_body(text: &str) -> Result<Value, serde_json::Error> {
    if text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(text)
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
