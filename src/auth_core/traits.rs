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

//! Auth Backend Trait.
//!
//! The REST collaborators a session store depends on. `HttpAuthBackend`
//! implements it over the real API; tests provide scripted mocks.

use async_trait::async_trait;

use crate::auth_core::errors::ApiError;
use crate::auth_core::models::{Credentials, Identity, SubscriptionSnapshot};

#[async_trait]
pub trait AuthBackend: Send + Sync + 'static {
    /// "Who am I" identity check for this domain.
    async fn who_am_i(&self) -> Result<Identity, ApiError>;

    /// Exchange credentials for an identity.
    async fn login(&self, credentials: &Credentials) -> Result<Identity, ApiError>;

    /// Server-side logout. Callers treat this as best-effort.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Module/subscription snapshot. Only meaningful for the organization domain.
    async fn fetch_subscription(&self) -> Result<SubscriptionSnapshot, ApiError>;
}
