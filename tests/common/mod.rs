// Common test utilities and helpers for all test modules

#![allow(dead_code)]

use async_trait::async_trait;
use casedesk_session::auth_core::models::AssignedModule;
use casedesk_session::{
    ApiError, AuthBackend, Credentials, DomainConfig, Identity, SessionState, SessionStore,
    SubscriptionSnapshot,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Scriptable AuthBackend. Every result can be swapped after the store
/// owning it has been built, via `store.backend()`.
pub struct MockBackend {
    pub who_am_i_result: Mutex<Result<Identity, ApiError>>,
    pub login_result: Mutex<Result<Identity, ApiError>>,
    pub logout_result: Mutex<Result<(), ApiError>>,
    pub subscription_result: Mutex<Result<SubscriptionSnapshot, ApiError>>,
    pub who_am_i_gate: Mutex<Option<Arc<Notify>>>,
    pub subscription_gate: Mutex<Option<Arc<Notify>>>,
    pub who_am_i_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub subscription_calls: AtomicUsize,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            who_am_i_result: Mutex::new(Err(ApiError::Unauthorized(None))),
            login_result: Mutex::new(Err(ApiError::Unauthorized(Some(
                "Invalid credentials".to_string(),
            )))),
            logout_result: Mutex::new(Ok(())),
            subscription_result: Mutex::new(Ok(SubscriptionSnapshot::default())),
            who_am_i_gate: Mutex::new(None),
            subscription_gate: Mutex::new(None),
            who_am_i_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            subscription_calls: AtomicUsize::new(0),
        }
    }
}

impl MockBackend {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(identity: Identity) -> Self {
        let backend = Self::default();
        backend.set_who_am_i(Ok(identity.clone()));
        backend.set_login(Ok(identity));
        backend
    }

    pub fn set_who_am_i(&self, result: Result<Identity, ApiError>) {
        *self.who_am_i_result.lock().unwrap() = result;
    }

    pub fn set_login(&self, result: Result<Identity, ApiError>) {
        *self.login_result.lock().unwrap() = result;
    }

    pub fn set_logout(&self, result: Result<(), ApiError>) {
        *self.logout_result.lock().unwrap() = result;
    }

    pub fn set_subscription(&self, result: Result<SubscriptionSnapshot, ApiError>) {
        *self.subscription_result.lock().unwrap() = result;
    }

    /// Make the next identity checks wait until the returned Notify fires.
    pub fn hold_who_am_i(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.who_am_i_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Let identity checks started from now on answer immediately.
    pub fn release_who_am_i(&self) {
        *self.who_am_i_gate.lock().unwrap() = None;
    }

    /// Make the next subscription fetches wait until the returned Notify fires.
    pub fn hold_subscription(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.subscription_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn who_am_i_calls(&self) -> usize {
        self.who_am_i_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub fn subscription_calls(&self) -> usize {
        self.subscription_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn who_am_i(&self) -> Result<Identity, ApiError> {
        self.who_am_i_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.who_am_i_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.who_am_i_result.lock().unwrap().clone()
    }

    async fn login(&self, _credentials: &Credentials) -> Result<Identity, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_result.lock().unwrap().clone()
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout_result.lock().unwrap().clone()
    }

    async fn fetch_subscription(&self) -> Result<SubscriptionSnapshot, ApiError> {
        self.subscription_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.subscription_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.subscription_result.lock().unwrap().clone()
    }
}

// --- Fixtures ---

pub fn identity(id: &str, role: &str, modules: &[&str]) -> Identity {
    Identity {
        id: id.to_string(),
        name: format!("User {}", id),
        email: Some(format!("{}@casedesk.test", id)),
        role: role.to_string(),
        organization: None,
        modules: modules.iter().map(|m| AssignedModule::named(*m)).collect(),
    }
}

pub fn lawyer(modules: &[&str]) -> Identity {
    identity("lawyer-1", "LAWYER", modules)
}

pub fn super_admin() -> Identity {
    identity("root-1", "SUPER_ADMIN", &[])
}

pub fn plan(allowed: &[&str]) -> SubscriptionSnapshot {
    SubscriptionSnapshot {
        plan_name: Some("Professional".to_string()),
        expires_at: None,
        allowed_modules: allowed.iter().map(|s| s.to_string()).collect(),
        expired: false,
    }
}

pub fn org_store(backend: MockBackend) -> SessionStore<MockBackend> {
    SessionStore::new(DomainConfig::organization(), backend)
}

pub fn platform_store(backend: MockBackend) -> SessionStore<MockBackend> {
    SessionStore::new(DomainConfig::platform(), backend)
}

/// Wait until the store's state satisfies `pred`, failing after two seconds.
pub async fn wait_for_state<F>(store: &SessionStore<MockBackend>, pred: F) -> SessionState
where
    F: FnMut(&SessionState) -> bool,
{
    let mut rx = store.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(pred))
        .await
        .expect("timed out waiting for session state")
        .expect("session state channel closed")
        .clone();
    state
}
