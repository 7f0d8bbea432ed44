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

//! casedesk-session: client-side session and authorization layer.
//!
//! This library holds who is logged in for each authority domain (platform
//! super-admin and organization users), answers capability and plan
//! questions, gates routes on that state, and carries transport-level
//! session signals back to the stores through an explicit event bridge.

pub mod auth_core;
pub mod bridge;
pub mod config;
pub mod guard;
pub mod notify;
pub mod session;
pub mod transport;
pub mod utils;

pub use auth_core::errors::{ApiError, SessionError};
pub use auth_core::events::BridgeSignal;
pub use auth_core::models::{Credentials, Identity, Notification, Severity, SubscriptionSnapshot};
pub use auth_core::traits::AuthBackend;
pub use auth_core::types::{CheckOutcome, Domain, LoadingState, Location, NotificationId};
pub use bridge::EventBridge;
pub use config::{Config, DomainConfig, DomainConfigs};
pub use guard::{AppShell, GateOutcome, GuardOutcome, Redirect, RouteGuard, ShellView, SubscriptionGate};
pub use notify::NotificationQueue;
pub use session::{CapabilityAccess, SessionState, SessionStore};
pub use transport::{HttpAuthBackend, HttpTransport};
