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

//! Session Store.
//!
//! Single source of truth for "who is logged in" within one authority
//! domain. The state lives in a `watch` channel so guards and shells can
//! observe transitions; all mutation goes through the store's own
//! operations and the bridge listener.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::auth_core::errors::ApiError;
use crate::auth_core::events::BridgeSignal;
use crate::auth_core::models::{Credentials, Identity, SubscriptionSnapshot};
use crate::auth_core::traits::AuthBackend;
use crate::auth_core::types::{CheckOutcome, Domain, LoadingState};
use crate::bridge::EventBridge;
use crate::config::{Config, DomainConfig};
use crate::session::access::CapabilityAccess;
use crate::session::state::SessionState;
use crate::utils::runtime::spawn_detached;

pub struct SessionStore<B: AuthBackend> {
    inner: Arc<StoreInner<B>>,
}

struct StoreInner<B> {
    config: DomainConfig,
    backend: B,
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
    /// Bumped by every local identity mutation and by every identity check
    /// as it starts. A check that finishes under an older epoch does not
    /// overwrite a newer decision.
    epoch: AtomicU64,
    refresh_after_login: bool,
}

impl<B: AuthBackend> Clone for SessionStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: AuthBackend> SessionStore<B> {
    pub fn new(config: DomainConfig, backend: B) -> Self {
        Self::build(config, backend, false)
    }

    /// Construct with runtime options taken from `Config`.
    pub fn from_config(config: DomainConfig, backend: B, runtime: &Config) -> Self {
        Self::build(config, backend, runtime.refresh_after_login)
    }

    fn build(config: DomainConfig, backend: B, refresh_after_login: bool) -> Self {
        let (state, _) = watch::channel(SessionState::new());
        Self {
            inner: Arc::new(StoreInner {
                config,
                backend,
                state,
                initialized: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
                refresh_after_login,
            }),
        }
    }

    fn from_inner(inner: Arc<StoreInner<B>>) -> Self {
        Self { inner }
    }

    fn downgrade(&self) -> Weak<StoreInner<B>> {
        Arc::downgrade(&self.inner)
    }

    pub fn domain(&self) -> Domain {
        self.inner.config.domain
    }

    pub fn config(&self) -> &DomainConfig {
        &self.inner.config
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    // --- Lifecycle ---

    /// Run the one implicit identity check.
    ///
    /// Only the first call talks to the backend; later calls return the
    /// current state. Never fails: every error becomes "no identity".
    pub async fn initialize(&self) -> SessionState {
        if self.inner.initialized.swap(true, Ordering::SeqCst) {
            debug!(domain = %self.domain(), "Session already initialized");
            return self.state();
        }
        self.check_identity("initialize").await;
        self.state()
    }

    /// Re-run the identity check. Loading never reverts to `Initializing`.
    pub async fn refresh(&self) -> SessionState {
        self.inner.initialized.store(true, Ordering::SeqCst);
        self.check_identity("refresh").await;
        self.state()
    }

    /// Optimistically adopt the identity from a just-completed login.
    pub fn login_success(&self, identity: Identity) {
        let user_changed = self
            .inner
            .state
            .borrow()
            .identity
            .as_ref()
            .map_or(true, |current| current.id != identity.id);
        let user_id = identity.id.clone();
        self.bump_epoch();
        self.inner.state.send_modify(|s| {
            if user_changed {
                s.subscription = None;
            }
            s.identity = Some(identity);
            s.last_check = CheckOutcome::Authenticated;
        });
        info!(domain = %self.domain(), user_id = %user_id, "Login accepted");

        let reconcile = self.inner.refresh_after_login;
        let fetch_plan = user_changed && self.inner.config.tracks_subscription();
        if !reconcile && !fetch_plan {
            return;
        }
        let weak = self.downgrade();
        spawn_detached("post_login_sync", async move {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let store = SessionStore::from_inner(inner);
            if reconcile {
                store.refresh().await;
            } else {
                store.load_subscription(&user_id).await;
            }
        });
    }

    /// Call the login endpoint and adopt the returned identity.
    ///
    /// Failures are action-level and returned to the caller; state is untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, ApiError> {
        let identity = self.inner.backend.login(credentials).await?;
        self.login_success(identity.clone());
        Ok(identity)
    }

    /// Clear local identity, then notify the server best-effort.
    ///
    /// The local clear happens before the network call is even started, so
    /// the session reads anonymous whether that call succeeds, fails, or is
    /// dropped mid-flight.
    pub async fn logout(&self) {
        self.clear("logout");
        if let Err(e) = self.inner.backend.logout().await {
            warn!(domain = %self.domain(), error = %e, "Server logout failed; local session already cleared");
        }
    }

    /// Subscribe this store to bridge signals for its own domain.
    ///
    /// Must be called from within a Tokio runtime. The listener holds a weak
    /// reference and ends once the store is dropped or the bridge closes.
    pub fn attach(&self, bridge: &EventBridge) -> JoinHandle<()> {
        let mut rx = bridge.subscribe();
        let weak = self.downgrade();
        let domain = self.domain();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(signal) => {
                        let Some(inner) = weak.upgrade() else {
                            debug!(domain = %domain, "Session store dropped; bridge listener exiting");
                            break;
                        };
                        SessionStore::from_inner(inner).apply_signal(signal);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(domain = %domain, skipped, "Bridge listener lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    /// React to one bridge signal. Returns whether state changed.
    pub fn apply_signal(&self, signal: BridgeSignal) -> bool {
        if signal.domain() != Some(self.domain()) {
            return false;
        }
        match signal {
            BridgeSignal::SessionInvalidated { .. } => {
                if self.is_anonymous() {
                    return false;
                }
                self.clear("session_invalidated");
                true
            }
            BridgeSignal::SubscriptionExpired { .. } => {
                if !self.inner.config.tracks_subscription() {
                    return false;
                }
                let changed = self.inner.state.send_if_modified(|s| {
                    if s.identity.is_none() {
                        return false;
                    }
                    match s.subscription.as_mut() {
                        Some(snapshot) if snapshot.expired => false,
                        Some(snapshot) => {
                            snapshot.expired = true;
                            true
                        }
                        None => {
                            s.subscription = Some(SubscriptionSnapshot::expired_placeholder());
                            true
                        }
                    }
                });
                if changed {
                    info!(domain = %self.domain(), "Subscription marked expired");
                }
                changed
            }
            BridgeSignal::ConnectivityLost => false,
        }
    }

    // --- Internals ---

    fn bump_epoch(&self) -> u64 {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn clear(&self, reason: &'static str) {
        self.bump_epoch();
        self.inner.state.send_modify(|s| {
            s.identity = None;
            s.subscription = None;
            s.last_check = CheckOutcome::Anonymous;
        });
        info!(domain = %self.domain(), reason, "Session cleared");
    }

    async fn check_identity(&self, reason: &'static str) {
        // Claim a fresh epoch so an older overlapping check cannot land last.
        let started = self.bump_epoch();
        let result = self.inner.backend.who_am_i().await;
        let superseded = self.inner.epoch.load(Ordering::SeqCst) != started;

        if superseded {
            // A login/logout/invalidation or a newer check landed while we were waiting.
            debug!(domain = %self.domain(), reason, "Identity check superseded by newer session change");
            self.inner.state.send_if_modified(|s| {
                let first = s.loading == LoadingState::Initializing;
                s.loading = LoadingState::Ready;
                first
            });
            return;
        }

        match result {
            Ok(identity) => {
                info!(
                    domain = %self.domain(),
                    reason,
                    user_id = %identity.id,
                    role = %identity.role,
                    "Identity check succeeded"
                );
                let user_id = identity.id.clone();
                self.inner.state.send_modify(|s| {
                    if s.identity.as_ref().map(|i| i.id.as_str()) != Some(user_id.as_str()) {
                        s.subscription = None;
                    }
                    s.identity = Some(identity);
                    s.loading = LoadingState::Ready;
                    s.last_check = CheckOutcome::Authenticated;
                });
                if self.inner.config.tracks_subscription() {
                    self.load_subscription(&user_id).await;
                }
            }
            Err(e) => {
                let outcome = if e.is_network() {
                    CheckOutcome::Unreachable
                } else {
                    CheckOutcome::Anonymous
                };
                debug!(domain = %self.domain(), reason, error = %e, ?outcome, "Identity check failed; treating as anonymous");
                self.inner.state.send_modify(|s| {
                    s.identity = None;
                    s.subscription = None;
                    s.loading = LoadingState::Ready;
                    s.last_check = outcome;
                });
            }
        }
    }

    /// Fetch the plan snapshot for `user_id` and apply it only if that user
    /// is still the one logged in.
    async fn load_subscription(&self, user_id: &str) {
        match self.inner.backend.fetch_subscription().await {
            Ok(snapshot) => {
                let plan = snapshot.plan_name.clone();
                let applied = self.inner.state.send_if_modified(|s| {
                    if s.identity.as_ref().map(|i| i.id.as_str()) != Some(user_id) {
                        return false;
                    }
                    s.subscription = Some(snapshot);
                    true
                });
                if applied {
                    debug!(domain = %self.domain(), user_id, plan = ?plan, "Subscription snapshot loaded");
                } else {
                    debug!(domain = %self.domain(), user_id, "Discarding subscription snapshot for a session that changed");
                }
            }
            Err(e) => {
                warn!(domain = %self.domain(), user_id, error = %e, "Subscription fetch failed");
            }
        }
    }

    // --- Accessors ---

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.inner.state.borrow().identity.clone()
    }

    pub fn loading(&self) -> LoadingState {
        self.inner.state.borrow().loading
    }

    pub fn is_ready(&self) -> bool {
        self.inner.state.borrow().is_ready()
    }

    pub fn last_check(&self) -> CheckOutcome {
        self.inner.state.borrow().last_check
    }

    // --- Predicates ---

    pub fn is_anonymous(&self) -> bool {
        self.inner.state.borrow().is_anonymous()
    }

    pub fn is_platform_admin(&self) -> bool {
        self.inner.state.borrow().is_platform_admin()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.inner.state.borrow().has_role(role)
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.inner.state.borrow().has_capability(name)
    }

    pub fn capability_in_plan(&self, name: &str) -> bool {
        self.inner.state.borrow().capability_in_plan(name)
    }

    pub fn capability_access(&self, name: &str) -> CapabilityAccess {
        self.inner.state.borrow().capability_access(name)
    }

    pub fn subscription_expired(&self) -> bool {
        self.inner.state.borrow().subscription_expired()
    }
}
