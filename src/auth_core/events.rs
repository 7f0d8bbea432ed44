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

//! Bridge signal vocabulary.
//!
//! The fixed set of signals the transport raises when specific HTTP outcomes
//! occur. Carried over the `EventBridge` to session stores and shells.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::auth_core::types::Domain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum BridgeSignal {
    /// HTTP 401 on a call made for `domain`.
    SessionInvalidated { domain: Domain },
    /// HTTP 403 carrying the expired marker.
    SubscriptionExpired { domain: Domain },
    /// No response was received at all.
    ConnectivityLost,
}

impl BridgeSignal {
    pub fn name(&self) -> &'static str {
        match self {
            BridgeSignal::SessionInvalidated { .. } => "session_invalidated",
            BridgeSignal::SubscriptionExpired { .. } => "subscription_expired",
            BridgeSignal::ConnectivityLost => "connectivity_lost",
        }
    }

    /// Domain the signal targets; `None` for process-wide signals.
    pub fn domain(&self) -> Option<Domain> {
        match self {
            BridgeSignal::SessionInvalidated { domain }
            | BridgeSignal::SubscriptionExpired { domain } => Some(*domain),
            BridgeSignal::ConnectivityLost => None,
        }
    }
}

impl fmt::Display for BridgeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.domain() {
            Some(d) => write!(f, "{}({})", self.name(), d),
            None => f.write_str(self.name()),
        }
    }
}
