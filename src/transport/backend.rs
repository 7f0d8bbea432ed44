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

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::auth_core::errors::ApiError;
use crate::auth_core::models::{Credentials, Identity, SubscriptionSnapshot};
use crate::auth_core::traits::AuthBackend;
use crate::config::DomainConfig;
use crate::transport::http::HttpTransport;

/// `AuthBackend` over the REST API for one domain.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    transport: HttpTransport,
    config: DomainConfig,
}

impl HttpAuthBackend {
    pub fn new(transport: HttpTransport, config: DomainConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

fn identity_from(body: Value) -> Result<Identity, ApiError> {
    Identity::from_response(body).map_err(|e| ApiError::Decode(format!("Invalid identity: {}", e)))
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn who_am_i(&self) -> Result<Identity, ApiError> {
        let body: Value = self.transport.get_json(&self.config.who_am_i_endpoint).await?;
        identity_from(body)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Identity, ApiError> {
        debug!(domain = %self.config.domain, email = %credentials.email, "Submitting login");
        let body: Value = self
            .transport
            .post_json(&self.config.login_endpoint, credentials)
            .await?;
        identity_from(body)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.transport.post_empty(&self.config.logout_endpoint).await
    }

    async fn fetch_subscription(&self) -> Result<SubscriptionSnapshot, ApiError> {
        let Some(endpoint) = &self.config.subscription_endpoint else {
            return Ok(SubscriptionSnapshot::default());
        };
        let body: Value = self.transport.get_json(endpoint).await?;
        let inner = match body.get("subscription").or_else(|| body.get("data")) {
            Some(v) if v.is_object() => v.clone(),
            _ => body,
        };
        serde_json::from_value(inner)
            .map_err(|e| ApiError::Decode(format!("Invalid subscription snapshot: {}", e)))
    }
}
