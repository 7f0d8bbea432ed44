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

/// Combined answer to "can this user use capability X right now".
///
/// `NotAssigned` and `NotInPlan` must stay distinct: the first means an
/// organization admin can grant it, the second needs a plan upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityAccess {
    /// Assigned and included in the plan.
    Enabled,
    /// Included in the plan but not assigned to this user.
    NotAssigned,
    /// Assigned to this user but not included in the plan.
    NotInPlan,
    /// Neither assigned nor in the plan.
    Unavailable,
    /// No one is logged in.
    Anonymous,
}

impl CapabilityAccess {
    pub fn from_flags(assigned: bool, in_plan: bool) -> Self {
        match (assigned, in_plan) {
            (true, true) => CapabilityAccess::Enabled,
            (false, true) => CapabilityAccess::NotAssigned,
            (true, false) => CapabilityAccess::NotInPlan,
            (false, false) => CapabilityAccess::Unavailable,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, CapabilityAccess::Enabled)
    }

    /// Message to show next to a disabled affordance.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CapabilityAccess::Enabled => None,
            CapabilityAccess::NotAssigned => {
                Some("Ask your organization admin for access to this module.")
            }
            CapabilityAccess::NotInPlan => Some("Upgrade your plan to use this module."),
            CapabilityAccess::Unavailable => {
                Some("This module is not part of your plan or your assigned modules.")
            }
            CapabilityAccess::Anonymous => Some("Sign in to continue."),
        }
    }
}
