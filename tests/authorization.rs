//! Authorization predicates over a session
//! Covers:
//! - assigned-capability and plan checks stay separate
//! - platform super-user bypass
//! - anonymous sessions are denied everything

mod common;

use casedesk_session::{CapabilityAccess, SessionState};
use common::*;
use proptest::prelude::*;

fn state_with(identity: casedesk_session::Identity, snapshot: Option<casedesk_session::SubscriptionSnapshot>) -> SessionState {
    let mut state = SessionState::new();
    state.identity = Some(identity);
    state.subscription = snapshot;
    state
}

#[test]
fn test_assigned_modules_with_unrestricted_plan() {
    let state = state_with(lawyer(&["cases", "clients"]), Some(plan(&[])));

    assert!(state.has_capability("cases"));
    assert!(!state.has_capability("billing"));
    // Empty allow-list means the plan does not restrict anything
    assert!(state.capability_in_plan("billing"));
    assert_eq!(state.capability_access("billing"), CapabilityAccess::NotAssigned);
    assert_eq!(state.capability_access("cases"), CapabilityAccess::Enabled);
}

#[test]
fn test_assigned_but_not_in_plan_diverges() {
    let state = state_with(lawyer(&["cases", "clients"]), Some(plan(&["cases"])));

    assert!(state.has_capability("clients"));
    assert!(!state.capability_in_plan("clients"));
    assert_eq!(state.capability_access("clients"), CapabilityAccess::NotInPlan);
    assert_ne!(
        CapabilityAccess::NotInPlan.hint(),
        CapabilityAccess::NotAssigned.hint()
    );
}

#[test]
fn test_missing_snapshot_does_not_restrict_plan() {
    let state = state_with(lawyer(&["cases"]), None);

    assert!(state.capability_in_plan("anything"));
    assert!(!state.subscription_expired());
}

#[test]
fn test_anonymous_is_denied_everything() {
    let state = SessionState::new();

    assert!(!state.has_capability("cases"));
    assert!(!state.capability_in_plan("cases"));
    assert!(!state.has_role("LAWYER"));
    assert!(!state.is_platform_admin());
    assert_eq!(state.capability_access("cases"), CapabilityAccess::Anonymous);
}

#[tokio::test]
async fn test_store_predicates_follow_state() {
    let backend = MockBackend::authenticated(lawyer(&["cases"]));
    backend.set_subscription(Ok(plan(&["cases", "documents"])));
    let store = org_store(backend);
    store.initialize().await;

    assert!(store.has_role("LAWYER"));
    assert!(store.has_capability("cases"));
    assert!(store.capability_in_plan("documents"));
    assert!(!store.capability_in_plan("billing"));
    assert!(!store.is_platform_admin());

    store.logout().await;
    assert!(!store.has_capability("cases"));
    assert!(!store.has_role("LAWYER"));
}

proptest! {
    #[test]
    fn prop_super_admin_passes_every_capability(name in "[a-zA-Z_]{1,24}", allowed in prop::collection::vec("[a-z]{1,8}", 0..4)) {
        let allowed: Vec<&str> = allowed.iter().map(String::as_str).collect();
        let state = state_with(super_admin(), Some(plan(&allowed)));

        prop_assert!(state.has_capability(&name));
        prop_assert!(state.capability_in_plan(&name));
        prop_assert_eq!(state.capability_access(&name), CapabilityAccess::Enabled);
    }

    #[test]
    fn prop_capability_requires_assignment(name in "[a-z]{1,12}", modules in prop::collection::vec("[a-z]{1,12}", 0..6)) {
        let assigned: Vec<&str> = modules.iter().map(String::as_str).collect();
        let state = state_with(lawyer(&assigned), Some(plan(&[])));

        prop_assert_eq!(state.has_capability(&name), modules.contains(&name));
    }

    #[test]
    fn prop_anonymous_denied_any_name(name in "\\PC{0,32}") {
        let state = SessionState::new();
        prop_assert!(!state.has_capability(&name));
        prop_assert!(!state.capability_in_plan(&name));
    }
}
