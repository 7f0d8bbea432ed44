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

use crate::auth_core::models::{Identity, SubscriptionSnapshot};
use crate::auth_core::types::{CheckOutcome, LoadingState};
use crate::session::access::CapabilityAccess;
use crate::utils::time;

/// Snapshot of one domain's session.
///
/// Every predicate is a pure function of this value and is recomputed on
/// each call. With no identity, only `is_anonymous` returns true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub loading: LoadingState,
    pub subscription: Option<SubscriptionSnapshot>,
    pub last_check: CheckOutcome,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            identity: None,
            loading: LoadingState::Initializing,
            subscription: None,
            last_check: CheckOutcome::Pending,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.loading == LoadingState::Ready
    }

    pub fn is_anonymous(&self) -> bool {
        self.identity.is_none()
    }

    pub fn role(&self) -> Option<&str> {
        self.identity.as_ref().map(|i| i.role.as_str())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role() == Some(role)
    }

    pub fn is_platform_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(Identity::is_platform_admin)
    }

    /// Assigned-module check with super-user bypass.
    pub fn has_capability(&self, name: &str) -> bool {
        match &self.identity {
            None => false,
            Some(identity) if identity.is_platform_admin() => true,
            Some(identity) => identity.has_module(name),
        }
    }

    /// Plan check. A missing snapshot or empty allow-list is unrestricted.
    pub fn capability_in_plan(&self, name: &str) -> bool {
        match &self.identity {
            None => false,
            Some(identity) if identity.is_platform_admin() => true,
            Some(_) => self
                .subscription
                .as_ref()
                .map_or(true, |snapshot| snapshot.allows(name)),
        }
    }

    pub fn capability_access(&self, name: &str) -> CapabilityAccess {
        if self.is_anonymous() {
            return CapabilityAccess::Anonymous;
        }
        CapabilityAccess::from_flags(self.has_capability(name), self.capability_in_plan(name))
    }

    /// True only for a logged-in identity whose snapshot says expired.
    pub fn subscription_expired(&self) -> bool {
        self.identity.is_some()
            && self
                .subscription
                .as_ref()
                .is_some_and(|s| s.is_expired_at(time::now()))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
