//! Route guard and app shell behavior
//! Covers:
//! - loading placeholder until the first identity check resolves
//! - login redirect carrying the return-to location
//! - role restriction redirecting to the landing page
//! - subscription expiry gate and its allow-list
//! - offline page on lost connectivity

mod common;

use std::time::Duration;

use casedesk_session::{
    AppShell, BridgeSignal, Domain, EventBridge, GuardOutcome, Location, Redirect, RouteGuard,
    ShellView, SubscriptionSnapshot,
};
use common::*;

#[tokio::test]
async fn test_guard_loading_before_first_check() {
    let store = org_store(MockBackend::authenticated(lawyer(&[])));
    let guard = RouteGuard::authenticated();

    assert_eq!(guard.check(&store, &Location::parse("/cases")), GuardOutcome::Loading);
    store.initialize().await;
    assert_eq!(guard.check(&store, &Location::parse("/cases")), GuardOutcome::Render);
}

#[tokio::test]
async fn test_anonymous_redirects_to_login_with_return_to() {
    let store = org_store(MockBackend::anonymous());
    store.initialize().await;
    let shell = AppShell::new(store, RouteGuard::authenticated());

    let view = shell.visit("/cases/42?tab=notes");

    let ShellView::Redirect(redirect) = view else {
        panic!("expected a redirect, got {:?}", view);
    };
    assert!(redirect.is_login());
    let href = redirect.href();
    assert!(href.starts_with("/login?next="));

    // Login page renders publicly and remembers where to go back to
    assert!(matches!(shell.visit(href.as_str()), ShellView::Public { .. }));
    assert_eq!(
        shell.location().return_to(),
        Some(Location::parse("/cases/42?tab=notes"))
    );
}

#[tokio::test]
async fn test_complete_login_returns_to_original_location() {
    let store = org_store(MockBackend::anonymous());
    store.initialize().await;
    let shell = AppShell::new(store.clone(), RouteGuard::authenticated());

    let ShellView::Redirect(redirect) = shell.visit("/clients") else {
        panic!("expected a redirect");
    };
    shell.navigate(redirect.href().as_str());
    store.login_success(lawyer(&["clients"]));

    assert_eq!(shell.complete_login(), Location::parse("/clients"));
    assert!(matches!(shell.render(), ShellView::Content { .. }));
}

#[tokio::test]
async fn test_complete_login_without_return_to_goes_to_landing() {
    let store = org_store(MockBackend::anonymous());
    store.initialize().await;
    let shell = AppShell::new(store.clone(), RouteGuard::authenticated());

    shell.navigate("/login");
    store.login_success(lawyer(&[]));

    assert_eq!(shell.complete_login(), Location::parse("/dashboard"));
}

#[tokio::test]
async fn test_foreign_return_to_is_ignored() {
    let store = org_store(MockBackend::anonymous());
    store.initialize().await;
    let shell = AppShell::new(store, RouteGuard::authenticated());

    shell.navigate("/login?next=%2F%2Fevil.example%2Fphish");
    assert_eq!(shell.complete_login(), Location::parse("/dashboard"));

    shell.navigate("/login?next=%2F%5Cevil.example");
    assert_eq!(shell.complete_login(), Location::parse("/dashboard"));
}

#[tokio::test]
async fn test_role_restriction_redirects_to_landing() {
    let store = platform_store(MockBackend::authenticated(identity("ops-1", "SUPPORT", &[])));
    store.initialize().await;
    let shell = AppShell::new(store, RouteGuard::require_role("SUPER_ADMIN"));

    let view = shell.visit("/super-admin/organizations");

    assert_eq!(
        view,
        ShellView::Redirect(Redirect::Landing {
            to: "/super-admin/dashboard".to_string()
        })
    );
}

#[tokio::test]
async fn test_role_restriction_lets_matching_role_through() {
    let store = platform_store(MockBackend::authenticated(super_admin()));
    store.initialize().await;
    let shell = AppShell::new(store, RouteGuard::require_any_role(["SUPER_ADMIN", "SUPPORT"]));

    assert!(matches!(
        shell.visit("/super-admin/organizations"),
        ShellView::Content { .. }
    ));
}

#[tokio::test]
async fn test_expired_subscription_shows_renew_outside_allow_list() {
    let backend = MockBackend::authenticated(lawyer(&["cases"]));
    backend.set_subscription(Ok(SubscriptionSnapshot {
        expired: true,
        ..plan(&["cases"])
    }));
    let store = org_store(backend);
    store.initialize().await;
    let shell = AppShell::new(store, RouteGuard::authenticated());

    assert!(matches!(shell.visit("/cases"), ShellView::RenewPlan { .. }));
    assert!(matches!(shell.visit("/billing"), ShellView::Content { .. }));
    assert!(matches!(shell.visit("/billing/invoices"), ShellView::Content { .. }));
    assert!(matches!(shell.visit("/profile"), ShellView::Content { .. }));
    // Prefix match is per path segment
    assert!(matches!(shell.visit("/billingx"), ShellView::RenewPlan { .. }));
}

#[tokio::test]
async fn test_gate_reevaluates_after_expiry_signal() {
    let store = org_store(MockBackend::authenticated(lawyer(&["cases"])));
    store.initialize().await;
    let shell = AppShell::new(store.clone(), RouteGuard::authenticated());
    assert!(matches!(shell.visit("/cases"), ShellView::Content { .. }));

    store.apply_signal(BridgeSignal::SubscriptionExpired {
        domain: Domain::Organization,
    });

    assert!(matches!(shell.render(), ShellView::RenewPlan { .. }));
}

#[tokio::test]
async fn test_platform_shell_has_no_subscription_gate() {
    let store = platform_store(MockBackend::authenticated(super_admin()));
    store.initialize().await;
    assert!(!store.apply_signal(BridgeSignal::SubscriptionExpired {
        domain: Domain::Platform,
    }));
    let shell = AppShell::new(store, RouteGuard::authenticated());

    assert!(matches!(
        shell.visit("/super-admin/organizations"),
        ShellView::Content { .. }
    ));
}

#[tokio::test]
async fn test_connectivity_lost_navigates_to_offline_page() {
    let store = org_store(MockBackend::authenticated(lawyer(&["cases"])));
    store.initialize().await;
    let bridge = EventBridge::default();
    let shell = AppShell::new(store, RouteGuard::authenticated());
    let _listener = shell.attach(&bridge);
    shell.navigate("/cases?page=3");

    let mut rx = shell.subscribe_location();
    bridge.publish(BridgeSignal::ConnectivityLost);
    let location = tokio::time::timeout(
        Duration::from_secs(2),
        rx.wait_for(|l| l.path == "/network-error"),
    )
    .await
    .expect("timed out waiting for navigation")
    .expect("location channel closed")
    .clone();

    assert_eq!(location.return_to(), Some(Location::parse("/cases?page=3")));
    assert!(matches!(shell.render(), ShellView::Offline { .. }));
}
