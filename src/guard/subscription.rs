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

use serde::{Deserialize, Serialize};

use crate::auth_core::types::Location;
use crate::config::DomainConfig;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateOutcome {
    Render,
    /// Replace routed content with the "renew your plan" page.
    RenewPlan,
}

/// Subscription-expiry gate around the organization app shell.
///
/// Path-dependent, so it is evaluated on every navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionGate {
    allow_list: Vec<String>,
}

impl SubscriptionGate {
    pub fn new<I, S>(allow_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_list: allow_list.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &DomainConfig) -> Self {
        Self::new(config.expiry_allow_list.iter().cloned())
    }

    pub fn is_allowed(&self, location: &Location) -> bool {
        self.allow_list.iter().any(|p| location.is_under(p))
    }

    pub fn evaluate(&self, state: &SessionState, location: &Location) -> GateOutcome {
        if state.subscription_expired() && !self.is_allowed(location) {
            GateOutcome::RenewPlan
        } else {
            GateOutcome::Render
        }
    }
}
