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
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::auth_core::constants::RETURN_TO_PARAM;
use crate::auth_core::events::BridgeSignal;
use crate::auth_core::traits::AuthBackend;
use crate::auth_core::types::Location;
use crate::bridge::EventBridge;
use crate::guard::route::{GuardOutcome, Redirect, RouteGuard};
use crate::guard::subscription::{GateOutcome, SubscriptionGate};
use crate::session::SessionStore;

/// What the shell shows for the current location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellView {
    Loading,
    Redirect(Redirect),
    RenewPlan { location: Location },
    /// The dedicated network-error page.
    Offline { location: Location },
    /// Login page and other routes outside the guarded area.
    Public { location: Location },
    Content { location: Location },
}

/// Authenticated app shell for one domain.
pub struct AppShell<B: AuthBackend> {
    inner: Arc<ShellInner<B>>,
}

struct ShellInner<B: AuthBackend> {
    store: SessionStore<B>,
    guard: RouteGuard,
    gate: Option<SubscriptionGate>,
    location: watch::Sender<Location>,
}

impl<B: AuthBackend> Clone for AppShell<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: AuthBackend> AppShell<B> {
    /// Domains that track a subscription get the expiry gate automatically.
    pub fn new(store: SessionStore<B>, guard: RouteGuard) -> Self {
        let gate = store
            .config()
            .tracks_subscription()
            .then(|| SubscriptionGate::from_config(store.config()));
        let landing = Location::parse(&store.config().landing_path);
        let (location, _) = watch::channel(landing);
        Self {
            inner: Arc::new(ShellInner {
                store,
                guard,
                gate,
                location,
            }),
        }
    }

    pub fn store(&self) -> &SessionStore<B> {
        &self.inner.store
    }

    pub fn location(&self) -> Location {
        self.inner.location.borrow().clone()
    }

    pub fn subscribe_location(&self) -> watch::Receiver<Location> {
        self.inner.location.subscribe()
    }

    pub fn navigate(&self, location: impl Into<Location>) {
        self.inner.location.send_replace(location.into());
    }

    /// Navigate and render in one step.
    pub fn visit(&self, location: impl Into<Location>) -> ShellView {
        self.navigate(location);
        self.render()
    }

    /// Recompute the view for the current location and session state.
    pub fn render(&self) -> ShellView {
        let location = self.location();
        let config = self.inner.store.config();

        if location.is_under(&config.offline_path) {
            return ShellView::Offline { location };
        }
        if location.is_under(&config.login_path) {
            return ShellView::Public { location };
        }

        let state = self.inner.store.state();
        match self.inner.guard.evaluate(&state, config, &location) {
            GuardOutcome::Loading => ShellView::Loading,
            GuardOutcome::Redirect(redirect) => ShellView::Redirect(redirect),
            GuardOutcome::Render => match &self.inner.gate {
                Some(gate) if gate.evaluate(&state, &location) == GateOutcome::RenewPlan => {
                    ShellView::RenewPlan { location }
                }
                _ => ShellView::Content { location },
            },
        }
    }

    /// After a successful login, go back to the location the user was
    /// bounced from, or to the landing page.
    pub fn complete_login(&self) -> Location {
        let target = self
            .location()
            .return_to()
            .unwrap_or_else(|| Location::parse(&self.inner.store.config().landing_path));
        self.navigate(target.clone());
        target
    }

    /// Navigate to the offline page whenever connectivity is lost.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn attach(&self, bridge: &EventBridge) -> JoinHandle<()> {
        let mut rx = bridge.subscribe();
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(BridgeSignal::ConnectivityLost) => {
                        let Some(inner) = weak.upgrade() else { break };
                        AppShell { inner }.go_offline();
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Shell bridge listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    fn go_offline(&self) {
        let config = self.inner.store.config();
        let current = self.location();
        if current.is_under(&config.offline_path) {
            return;
        }
        let next: String =
            url::form_urlencoded::byte_serialize(current.href().as_bytes()).collect();
        info!(domain = %config.domain, from = %current, "Connectivity lost; showing network error page");
        self.navigate(Location {
            path: config.offline_path.clone(),
            query: Some(format!("{}={}", RETURN_TO_PARAM, next)),
        });
    }
}
