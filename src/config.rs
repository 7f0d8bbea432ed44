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

use crate::auth_core::constants::{config as env_keys, defaults, organization, platform};
use crate::auth_core::errors::SessionError;
use crate::auth_core::types::Domain;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Endpoints and redirect targets for one authority domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    pub domain: Domain,
    pub who_am_i_endpoint: String,
    pub login_endpoint: String,
    pub logout_endpoint: String,
    /// Only the organization domain carries a subscription snapshot.
    pub subscription_endpoint: Option<String>,
    pub login_path: String,
    pub landing_path: String,
    pub offline_path: String,
    /// Paths reachable while the subscription is expired.
    pub expiry_allow_list: Vec<String>,
}

impl DomainConfig {
    pub fn platform() -> Self {
        Self {
            domain: Domain::Platform,
            who_am_i_endpoint: platform::WHO_AM_I.to_string(),
            login_endpoint: platform::LOGIN.to_string(),
            logout_endpoint: platform::LOGOUT.to_string(),
            subscription_endpoint: None,
            login_path: platform::LOGIN_PATH.to_string(),
            landing_path: platform::LANDING_PATH.to_string(),
            offline_path: platform::OFFLINE_PATH.to_string(),
            expiry_allow_list: Vec::new(),
        }
    }

    pub fn organization() -> Self {
        Self {
            domain: Domain::Organization,
            who_am_i_endpoint: organization::WHO_AM_I.to_string(),
            login_endpoint: organization::LOGIN.to_string(),
            logout_endpoint: organization::LOGOUT.to_string(),
            subscription_endpoint: Some(organization::SUBSCRIPTION.to_string()),
            login_path: organization::LOGIN_PATH.to_string(),
            landing_path: organization::LANDING_PATH.to_string(),
            offline_path: organization::OFFLINE_PATH.to_string(),
            expiry_allow_list: organization::EXPIRY_ALLOW_LIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn for_domain(domain: Domain) -> Self {
        match domain {
            Domain::Platform => Self::platform(),
            Domain::Organization => Self::organization(),
        }
    }

    pub fn tracks_subscription(&self) -> bool {
        self.subscription_endpoint.is_some()
    }

    fn apply(&mut self, o: DomainOverrides) {
        if let Some(v) = o.who_am_i_endpoint {
            self.who_am_i_endpoint = v;
        }
        if let Some(v) = o.login_endpoint {
            self.login_endpoint = v;
        }
        if let Some(v) = o.logout_endpoint {
            self.logout_endpoint = v;
        }
        if let Some(v) = o.subscription_endpoint {
            self.subscription_endpoint = Some(v).filter(|s| !s.is_empty());
        }
        if let Some(v) = o.login_path {
            self.login_path = v;
        }
        if let Some(v) = o.landing_path {
            self.landing_path = v;
        }
        if let Some(v) = o.offline_path {
            self.offline_path = v;
        }
        if let Some(v) = o.expiry_allow_list {
            self.expiry_allow_list = v;
        }
    }
}

/// Partial per-domain settings read from the routes YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DomainOverrides {
    who_am_i_endpoint: Option<String>,
    login_endpoint: Option<String>,
    logout_endpoint: Option<String>,
    subscription_endpoint: Option<String>,
    login_path: Option<String>,
    landing_path: Option<String>,
    offline_path: Option<String>,
    expiry_allow_list: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoutesFile {
    #[serde(default)]
    platform: Option<DomainOverrides>,
    #[serde(default)]
    organization: Option<DomainOverrides>,
}

/// Both domains' settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfigs {
    pub platform: DomainConfig,
    pub organization: DomainConfig,
}

impl DomainConfigs {
    pub fn get(&self, domain: Domain) -> &DomainConfig {
        match domain {
            Domain::Platform => &self.platform,
            Domain::Organization => &self.organization,
        }
    }

    /// Parse route overrides from YAML text on top of the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SessionError> {
        let file: RoutesFile = serde_yaml_ng::from_str(yaml).map_err(|e| {
            SessionError::Configuration(format!("Invalid routes YAML: {}", e))
        })?;
        let mut configs = Self::default();
        if let Some(o) = file.platform {
            configs.platform.apply(o);
        }
        if let Some(o) = file.organization {
            configs.organization.apply(o);
        }
        Ok(configs)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

impl Default for DomainConfigs {
    fn default() -> Self {
        Self {
            platform: DomainConfig::platform(),
            organization: DomainConfig::organization(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_base_url: String,
    pub log_level: String,
    pub log_format: String, // "json" or "text"
    pub request_timeout_secs: u64,
    pub notification_ttl_ms: u64,
    pub bridge_capacity: usize,
    /// Reconcile the optimistic identity with a background refresh after login.
    pub refresh_after_login: bool,
    pub routes_yaml_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, SessionError> {
        Ok(Self {
            api_base_url: env::var(env_keys::ENV_API_BASE_URL)
                .unwrap_or_else(|_| defaults::API_BASE_URL.to_string()),
            log_level: env::var(env_keys::ENV_LOG_LEVEL).unwrap_or_else(|_| "info".to_string()),
            log_format: env::var(env_keys::ENV_LOG_FORMAT)
                .unwrap_or_else(|_| "text".to_string()),
            request_timeout_secs: parse_env(
                env_keys::ENV_REQUEST_TIMEOUT_SECS,
                defaults::REQUEST_TIMEOUT_SECS,
            )?,
            notification_ttl_ms: parse_env(
                env_keys::ENV_NOTIFICATION_TTL_MS,
                defaults::NOTIFICATION_TTL_MS,
            )?,
            bridge_capacity: parse_env(env_keys::ENV_BRIDGE_CAPACITY, defaults::BRIDGE_CAPACITY)?,
            refresh_after_login: env::var(env_keys::ENV_REFRESH_AFTER_LOGIN)
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            routes_yaml_path: env::var(env_keys::ENV_ROUTES_YAML_PATH)
                .ok()
                .map(PathBuf::from),
        })
    }

    /// Domain settings, with YAML overrides applied when a routes file is configured.
    pub fn domain_configs(&self) -> Result<DomainConfigs, SessionError> {
        match &self.routes_yaml_path {
            Some(path) => DomainConfigs::from_yaml_file(path),
            None => Ok(DomainConfigs::default()),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, SessionError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            SessionError::Configuration(format!("{} has an invalid value: {}", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: defaults::API_BASE_URL.to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            notification_ttl_ms: defaults::NOTIFICATION_TTL_MS,
            bridge_capacity: defaults::BRIDGE_CAPACITY,
            refresh_after_login: false,
            routes_yaml_path: None,
        }
    }
}
