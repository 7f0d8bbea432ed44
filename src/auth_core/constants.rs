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

//! casedesk-session constants - single source of truth for endpoints, paths and defaults.

/// Role tags understood by the authorization predicates.
pub mod roles {
    /// Platform-level administrator. Bypasses every capability check.
    pub const SUPER_ADMIN: &str = "SUPER_ADMIN";
    /// Organization administrator.
    pub const ORG_ADMIN: &str = "ADMIN";
}

/// Platform (super-admin console) domain defaults.
pub mod platform {
    pub const WHO_AM_I: &str = "/api/super-admin/auth/me";
    pub const LOGIN: &str = "/api/super-admin/auth/login";
    pub const LOGOUT: &str = "/api/super-admin/auth/logout";
    pub const LOGIN_PATH: &str = "/super-admin/login";
    pub const LANDING_PATH: &str = "/super-admin/dashboard";
    pub const OFFLINE_PATH: &str = "/network-error";
}

/// Organization-user domain defaults.
pub mod organization {
    pub const WHO_AM_I: &str = "/api/auth/me";
    pub const LOGIN: &str = "/api/auth/login";
    pub const LOGOUT: &str = "/api/auth/logout";
    pub const SUBSCRIPTION: &str = "/api/subscription/modules";
    pub const LOGIN_PATH: &str = "/login";
    pub const LANDING_PATH: &str = "/dashboard";
    pub const OFFLINE_PATH: &str = "/network-error";
    /// Paths that stay reachable while the subscription is expired.
    pub const EXPIRY_ALLOW_LIST: &[&str] = &["/billing", "/profile"];
}

/// Query parameter carrying the originally requested location through login.
pub const RETURN_TO_PARAM: &str = "next";

/// Transport markers
pub mod wire {
    /// Body field flagging a 403 as a subscription expiry.
    pub const EXPIRED_FIELD: &str = "expired";
    /// Alternative body code for the same condition.
    pub const EXPIRED_CODE: &str = "SUBSCRIPTION_EXPIRED";
    /// Fallback when the server gives no readable message.
    pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
    pub const CONNECT_TIMEOUT_SECS: u64 = 2;
    pub const POOL_IDLE_TIMEOUT_SECS: u64 = 90;
}

/// Runtime defaults
pub mod defaults {
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;
    pub const NOTIFICATION_TTL_MS: u64 = 5_000;
    pub const BRIDGE_CAPACITY: usize = 64;
    pub const API_BASE_URL: &str = "http://localhost:5000";
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_API_BASE_URL: &str = "CASEDESK_API_BASE_URL";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
    pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CASEDESK_REQUEST_TIMEOUT_SECS";
    pub const ENV_NOTIFICATION_TTL_MS: &str = "CASEDESK_NOTIFICATION_TTL_MS";
    pub const ENV_BRIDGE_CAPACITY: &str = "CASEDESK_BRIDGE_CAPACITY";
    pub const ENV_REFRESH_AFTER_LOGIN: &str = "CASEDESK_REFRESH_AFTER_LOGIN";
    pub const ENV_ROUTES_YAML_PATH: &str = "CASEDESK_ROUTES_YAML_PATH";
}
