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

//! Session Types.
//!
//! Small strongly typed values shared across the store, guards and queue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::auth_core::constants::RETURN_TO_PARAM;

/// Authority domain a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Platform super-admin console.
    Platform,
    /// Organization users (lawyers, staff, org admins).
    Organization,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Platform => "platform",
            Domain::Organization => "organization",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "platform" | "super-admin" | "superadmin" => Ok(Domain::Platform),
            "organization" | "org" => Ok(Domain::Organization),
            other => Err(format!("unknown domain: {}", other)),
        }
    }
}

/// Whether the first identity check has resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadingState {
    Initializing,
    Ready,
}

/// Result of the most recent identity check.
///
/// Identity is cleared for every non-authenticated outcome; this only records
/// why, so callers can tell "logged out" from "server unreachable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckOutcome {
    Pending,
    Authenticated,
    Anonymous,
    Unreachable,
}

/// Newtype wrapper around Uuid identifying one notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for NotificationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(NotificationId)
    }
}

impl From<NotificationId> for String {
    fn from(id: NotificationId) -> Self {
        id.0.to_string()
    }
}

impl TryFrom<String> for NotificationId {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Uuid::parse_str(&s).map(NotificationId)
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An in-app location: path plus optional raw query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default)]
    pub query: Option<String>,
}

impl Location {
    /// Parse `"/cases?page=2"` style hrefs. A missing leading slash is added.
    pub fn parse(href: &str) -> Self {
        let (path, query) = match href.split_once('?') {
            Some((p, q)) => (p, Some(q.to_string()).filter(|q| !q.is_empty())),
            None => (href, None),
        };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self { path, query }
    }

    pub fn href(&self) -> String {
        match &self.query {
            Some(q) => format!("{}?{}", self.path, q),
            None => self.path.clone(),
        }
    }

    /// Recover the post-login target carried in this location's query.
    ///
    /// Only local targets (single leading slash) are accepted. Backslashes
    /// and control characters are rejected since browsers normalise `/\host`
    /// to `//host`.
    pub fn return_to(&self) -> Option<Location> {
        let query = self.query.as_deref()?;
        let target = url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == RETURN_TO_PARAM)
            .map(|(_, v)| v.into_owned())?;
        if !target.starts_with('/')
            || target.starts_with("//")
            || target.contains('\\')
            || target.chars().any(char::is_control)
        {
            return None;
        }
        Some(Location::parse(&target))
    }

    /// True when `self.path` equals `prefix` or is nested under it.
    pub fn is_under(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return true;
        }
        match self.path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl From<&str> for Location {
    fn from(href: &str) -> Self {
        Location::parse(href)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}
