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

use crate::auth_core::constants::RETURN_TO_PARAM;
use crate::auth_core::traits::AuthBackend;
use crate::auth_core::types::Location;
use crate::config::DomainConfig;
use crate::session::{SessionState, SessionStore};

/// Where a guard sends the user instead of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Redirect {
    /// Authentication failure: go to the domain's login entry point.
    Login { to: String, return_to: Location },
    /// Authorization failure: go to the domain's default landing page.
    Landing { to: String },
}

impl Redirect {
    pub fn href(&self) -> String {
        match self {
            Redirect::Login { to, return_to } => {
                let next: String =
                    url::form_urlencoded::byte_serialize(return_to.href().as_bytes()).collect();
                format!("{}?{}={}", to, RETURN_TO_PARAM, next)
            }
            Redirect::Landing { to } => to.clone(),
        }
    }

    pub fn is_login(&self) -> bool {
        matches!(self, Redirect::Login { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardOutcome {
    /// First identity check still pending: show a neutral placeholder.
    Loading,
    Redirect(Redirect),
    Render,
}

/// Gate for a route subtree, optionally restricted to some roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteGuard {
    required_roles: Vec<String>,
}

impl RouteGuard {
    /// Any authenticated identity passes.
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Only identities holding `role` pass.
    pub fn require_role(role: impl Into<String>) -> Self {
        Self {
            required_roles: vec![role.into()],
        }
    }

    /// Identities holding any of `roles` pass.
    pub fn require_any_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required_roles(&self) -> &[String] {
        &self.required_roles
    }

    pub fn evaluate(
        &self,
        state: &SessionState,
        config: &DomainConfig,
        location: &Location,
    ) -> GuardOutcome {
        if !state.is_ready() {
            return GuardOutcome::Loading;
        }
        let Some(identity) = &state.identity else {
            return GuardOutcome::Redirect(Redirect::Login {
                to: config.login_path.clone(),
                return_to: location.clone(),
            });
        };
        if !self.required_roles.is_empty() && !self.required_roles.contains(&identity.role) {
            return GuardOutcome::Redirect(Redirect::Landing {
                to: config.landing_path.clone(),
            });
        }
        GuardOutcome::Render
    }

    /// Evaluate against a store's current state.
    pub fn check<B: AuthBackend>(&self, store: &SessionStore<B>, location: &Location) -> GuardOutcome {
        self.evaluate(&store.state(), store.config(), location)
    }
}
