//! Integration tests for the session guard and language store.
//!
//! These drive the public API the way the application shell does: a
//! context, a mounted guard, a router and an auth provider resolving
//! asynchronously.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;

use clinic_portal::auth::{AuthProvider, AuthState, StaticAuthProvider, User};
use clinic_portal::config::Config;
use clinic_portal::error::{AuthError, LanguageError};
use clinic_portal::guard::{GuardState, MountedGuard, RouteGuard};
use clinic_portal::i18n::{Language, LanguageSelector};
use clinic_portal::models::DashboardData;
use clinic_portal::router::{MemoryRouter, Router};
use clinic_portal::shell::{AppShell, Page, View};
use clinic_portal::AppContext;

// ==================== Test Helpers ====================

fn context_at(path: &str) -> (Arc<AppContext>, Arc<MemoryRouter>) {
    let router = Arc::new(MemoryRouter::new(path));
    let config = Config {
        auth_timeout: Duration::from_secs(5),
        ..Config::default()
    };
    (Arc::new(AppContext::new(config, router.clone())), router)
}

fn mount_guard(context: &AppContext) -> MountedGuard {
    RouteGuard::new(context.config.login_path.clone()).mount(
        &context.auth,
        Arc::clone(&context.router),
        Arc::clone(&context.metrics),
    )
}

struct FailingProvider;

impl AuthProvider for FailingProvider {
    fn current_user(&self) -> BoxFuture<'_, Result<Option<User>, AuthError>> {
        async { Err(AuthError::Provider("session endpoint returned 500".to_string())) }.boxed()
    }
}

struct NeverProvider;

impl AuthProvider for NeverProvider {
    fn current_user(&self) -> BoxFuture<'_, Result<Option<User>, AuthError>> {
        futures::future::pending().boxed()
    }
}

// ==================== Language Store Tests ====================

#[test]
fn test_language_round_trip_for_both_values() {
    let (context, _) = context_at("/dashboard");

    for start in [Language::Es, Language::En] {
        context.language.set(start);
        context.language.set_language(start.other().code()).unwrap();
        context.language.set_language(start.other().other().code()).unwrap();
        assert_eq!(context.language.language(), start);
    }
}

#[test]
fn test_set_language_fr_is_rejected() {
    let (context, _) = context_at("/dashboard");
    let before = context.language.language();

    let result = context.language.set_language("fr");

    assert_eq!(result, Err(LanguageError::InvalidLanguage("fr".to_string())));
    assert_eq!(context.language.language(), before);
}

#[test]
fn test_selector_toggle_is_observed() {
    let (context, _) = context_at("/dashboard");
    let selector = LanguageSelector::new(Arc::clone(&context.language), Arc::clone(&context.metrics));

    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = context
        .language
        .subscribe(move |language| sink.lock().unwrap().push(*language));

    let transition = selector.activate();

    assert_eq!(transition.from, Language::Es);
    assert_eq!(transition.to, Language::En);
    assert_eq!(*seen.lock().unwrap(), vec![Language::En]);
    assert_eq!(context.metrics.language_toggles(), 1);
}

// ==================== Route Guard Tests ====================

#[tokio::test(start_paused = true)]
async fn test_no_navigation_while_loading() {
    let (context, router) = context_at("/patients/new");
    let guard = mount_guard(&context);
    let provider = StaticAuthProvider::new().with_latency(Duration::from_secs(2));

    let resolution = context.resolve_session(&provider);
    tokio::pin!(resolution);

    // Route changes during loading are not redirected either.
    tokio::select! {
        _ = &mut resolution => panic!("resolution should still be pending"),
        _ = tokio::time::sleep(Duration::from_secs(1)) => {}
    }
    router.navigate("/dashboard");
    assert_eq!(guard.state(), GuardState::Loading);
    assert_eq!(router.navigations_to("/login"), 0);

    resolution.await;
    assert_eq!(guard.state(), GuardState::Unauthenticated);
    assert_eq!(router.navigations_to("/login"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sign_in_while_loading_is_not_undone_by_late_answer() {
    let (context, router) = context_at("/login");
    let guard = mount_guard(&context);
    let provider = StaticAuthProvider::new().with_latency(Duration::from_secs(2));

    let resolution = context.resolve_session(&provider);
    tokio::pin!(resolution);

    tokio::select! {
        _ = &mut resolution => panic!("resolution should still be pending"),
        _ = tokio::time::sleep(Duration::from_secs(1)) => {}
    }
    context.auth.sign_in(User::new("u1"));
    router.navigate("/dashboard");

    let state = resolution.await;

    assert_eq!(state.user().map(|u| u.id.as_str()), Some("u1"));
    assert_eq!(guard.state(), GuardState::Authenticated);
    assert_eq!(router.current_path(), "/dashboard");
    assert_eq!(router.navigations_to("/login"), 0);
    assert_eq!(context.metrics.stale_transitions(), 1);
}

#[tokio::test]
async fn test_scenario_signed_in_at_dashboard() {
    let (context, router) = context_at("/dashboard");
    let guard = mount_guard(&context);
    assert_eq!(guard.state(), GuardState::Loading);

    let provider = StaticAuthProvider::new().with_session(User::new("u1"));
    context.resolve_session(&provider).await;

    assert_eq!(guard.state(), GuardState::Authenticated);
    assert_eq!(router.navigation_count(), 0);
    assert_eq!(router.current_path(), "/dashboard");
}

#[tokio::test]
async fn test_scenario_signed_out_at_new_patient() {
    let (context, router) = context_at("/patients/new");
    let guard = mount_guard(&context);

    context.resolve_session(&StaticAuthProvider::new()).await;

    assert_eq!(guard.state(), GuardState::Unauthenticated);
    assert_eq!(router.navigation_count(), 1);
    assert_eq!(router.navigations_to("/login"), 1);
    assert_eq!(router.current_path(), "/login");
    assert_eq!(context.metrics.redirects(), 1);
}

#[tokio::test]
async fn test_signed_out_at_login_does_not_navigate() {
    let (context, router) = context_at("/login");
    let guard = mount_guard(&context);

    context.resolve_session(&StaticAuthProvider::new()).await;

    assert_eq!(guard.state(), GuardState::Unauthenticated);
    assert_eq!(router.navigation_count(), 0);
}

#[tokio::test]
async fn test_resolution_after_unmount_does_not_navigate() {
    let (context, router) = context_at("/dashboard");
    let guard = mount_guard(&context);

    guard.unmount();
    context.resolve_session(&StaticAuthProvider::new()).await;

    assert_eq!(context.auth.state(), AuthState::SignedOut);
    assert_eq!(router.navigation_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_provider_error_redirects() {
    let (context, router) = context_at("/dashboard");
    let guard = mount_guard(&context);

    context.resolve_session(&FailingProvider).await;

    assert_eq!(guard.state(), GuardState::Unauthenticated);
    assert_eq!(router.navigations_to("/login"), 1);
    assert_eq!(context.metrics.auth_failures(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_provider_timeout_redirects() {
    let (context, router) = context_at("/dashboard");
    let guard = mount_guard(&context);

    let state = context.resolve_session(&NeverProvider).await;

    assert_eq!(state, AuthState::SignedOut);
    assert_eq!(guard.state(), GuardState::Unauthenticated);
    assert_eq!(router.navigations_to("/login"), 1);
}

#[test]
fn test_repeated_sign_out_redirects_once() {
    let (context, router) = context_at("/dashboard");
    let _guard = mount_guard(&context);
    context.auth.resolve(Some(User::new("u1")));

    context.auth.sign_out();
    context.auth.sign_out();
    context.auth.resolve(None);

    assert_eq!(router.navigations_to("/login"), 1);
}

#[test]
fn test_sign_in_then_out_then_protected_navigation() {
    let (context, router) = context_at("/login");
    let guard = mount_guard(&context);
    context.auth.resolve(None);

    context.auth.sign_in(User::new("u1"));
    router.navigate("/patients/new");
    assert_eq!(guard.state(), GuardState::Authenticated);
    assert_eq!(router.current_path(), "/patients/new");

    context.auth.sign_out();
    assert_eq!(router.current_path(), "/login");

    router.navigate("/dashboard");
    assert_eq!(router.current_path(), "/login");
    assert_eq!(router.navigations_to("/login"), 2);
}

// ==================== Shell Tests ====================

#[tokio::test]
async fn test_shell_end_to_end() {
    let (context, router) = context_at("/dashboard");
    let shell = AppShell::mount(Arc::clone(&context), DashboardData::default());
    assert!(matches!(shell.render(), View::Loading(_)));

    let provider = StaticAuthProvider::new()
        .with_account(User::new("u1").with_email("ana@clinic.test"), "s3cret");
    context.resolve_session(&provider).await;
    assert_eq!(router.current_path(), "/login");
    assert!(matches!(shell.render(), View::Page { page: Page::Login, .. }));

    let user = provider.authenticate("ana@clinic.test", "s3cret").unwrap();
    context.auth.sign_in(user);
    shell.navigate("/dashboard");
    shell.selector().activate();

    let view = shell.render();
    assert!(matches!(&view, View::Page { page: Page::Dashboard, .. }));
    assert!(view.text().contains("Welcome, ana@clinic.test"));

    let context = shell.unmount();
    let report = context.shutdown();
    assert_eq!(report.redirects, 1);
    assert_eq!(report.language_toggles, 1);
}
