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

//! Domain models for casedesk-session.
//!
//! Pure data structures for identities, subscription snapshots and
//! notifications. Free of I/O; shapes follow the practice-management API's
//! camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::auth_core::constants::roles;
use crate::auth_core::types::NotificationId;

/// Reference to the organization an org-domain identity belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrganizationRepr")]
pub struct OrganizationRef {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OrganizationRepr {
    Id(String),
    Record {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<OrganizationRepr> for OrganizationRef {
    fn from(repr: OrganizationRepr) -> Self {
        match repr {
            OrganizationRepr::Id(id) => Self { id, name: None },
            OrganizationRepr::Record { id, name } => Self { id, name },
        }
    }
}

/// A capability/module assigned to a user, independent of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ModuleRepr")]
pub struct AssignedModule {
    pub name: String,
    pub permissions: Vec<String>,
}

impl AssignedModule {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModuleRepr {
    Name(String),
    Record {
        #[serde(alias = "moduleName", alias = "key")]
        name: String,
        #[serde(default)]
        permissions: Vec<String>,
    },
}

impl From<ModuleRepr> for AssignedModule {
    fn from(repr: ModuleRepr) -> Self {
        match repr {
            ModuleRepr::Name(name) => Self::named(name),
            ModuleRepr::Record { name, permissions } => Self { name, permissions },
        }
    }
}

/// The authenticated user record held by a session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default, alias = "org", alias = "organizationId")]
    pub organization: Option<OrganizationRef>,
    #[serde(default, alias = "assignedModules")]
    pub modules: Vec<AssignedModule>,
}

impl Identity {
    pub fn is_platform_admin(&self) -> bool {
        self.role == roles::SUPER_ADMIN
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m.name == name)
    }

    /// Parse an identity out of a login or who-am-i response.
    ///
    /// Accepts `{ "user": {..} }`, `{ "admin": {..} }`, `{ "data": {..} }`
    /// envelopes as well as a bare identity object.
    pub fn from_response(body: serde_json::Value) -> Result<Self, serde_json::Error> {
        for key in ["user", "admin", "data"] {
            if let Some(inner) = body.get(key) {
                if inner.is_object() {
                    return serde_json::from_value(inner.clone());
                }
            }
        }
        serde_json::from_value(body)
    }
}

/// The organization's current plan as last fetched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSnapshot {
    #[serde(default, alias = "plan")]
    pub plan_name: Option<String>,
    #[serde(default, alias = "endDate")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Empty means unrestricted.
    #[serde(default, alias = "modules", alias = "allowedModuleNames")]
    pub allowed_modules: Vec<String>,
    /// Explicit expiry marker from the server or the event bridge.
    #[serde(default, alias = "isExpired")]
    pub expired: bool,
}

impl SubscriptionSnapshot {
    /// Snapshot installed when an expiry signal arrives before any fetch.
    pub fn expired_placeholder() -> Self {
        Self {
            expired: true,
            ..Self::default()
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expired || self.expires_at.is_some_and(|at| at <= now)
    }

    /// Empty allow-list is treated as "not yet enforced".
    pub fn allows(&self, module: &str) -> bool {
        self.allowed_modules.is_empty() || self.allowed_modules.iter().any(|m| m == module)
    }
}

/// Login form payload.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// A transient user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub severity: Severity,
    pub message: String,
    pub title: Option<String>,
    pub ttl: Duration,
    pub created_at: DateTime<Utc>,
}
