//! Page shells and the application shell that composes them.
//!
//! [`AppShell`] mounts the route guard and the language selector over an
//! [`AppContext`] and renders whichever page the router points at. Page
//! data is supplied from outside and only read.

pub mod pages;

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::context::AppContext;
use crate::guard::{GuardState, MountedGuard, RouteGuard};
use crate::i18n::LanguageSelector;
use crate::models::{DashboardData, NewPatient, NewPatientForm, ValidationReport};

pub const NEW_PATIENT_PATH: &str = "/patients/new";

/// Page addressed by a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    NewPatient,
    Login,
    NotFound(String),
}

impl Page {
    pub fn for_path(path: &str, login_path: &str, home_path: &str) -> Page {
        match path {
            p if p == login_path => Page::Login,
            p if p == "/" || p == home_path => Page::Dashboard,
            NEW_PATIENT_PATH => Page::NewPatient,
            other => Page::NotFound(other.to_string()),
        }
    }
}

/// What the shell currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Session still resolving.
    Loading(String),
    /// Signed out on a protected route; the guard is moving to login.
    Redirecting,
    Page { page: Page, text: String },
}

impl View {
    pub fn text(&self) -> &str {
        match self {
            View::Loading(text) => text,
            View::Redirecting => "",
            View::Page { text, .. } => text,
        }
    }
}

pub struct AppShell {
    context: Arc<AppContext>,
    guard: MountedGuard,
    selector: LanguageSelector,
    dashboard: DashboardData,
    patient_form: NewPatientForm,
    patient_report: Option<ValidationReport>,
    login_failed: bool,
}

impl AppShell {
    /// Mount the guard and selector over `context`.
    pub fn mount(context: Arc<AppContext>, dashboard: DashboardData) -> Self {
        let guard = RouteGuard::new(context.config.login_path.clone()).mount(
            &context.auth,
            Arc::clone(&context.router),
            Arc::clone(&context.metrics),
        );
        let selector = LanguageSelector::new(Arc::clone(&context.language), Arc::clone(&context.metrics));

        Self {
            context,
            guard,
            selector,
            dashboard,
            patient_form: NewPatientForm::default(),
            patient_report: None,
            login_failed: false,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn guard_state(&self) -> GuardState {
        self.guard.state()
    }

    pub fn selector(&self) -> &LanguageSelector {
        &self.selector
    }

    pub fn navigate(&self, path: &str) {
        self.context.router.navigate(path);
    }

    /// Replace the dashboard data with a fresh copy from the caller.
    pub fn set_dashboard(&mut self, data: DashboardData) {
        self.dashboard = data;
    }

    /// Record the outcome of a sign-in attempt made on the login page.
    pub fn set_login_failed(&mut self, failed: bool) {
        self.login_failed = failed;
    }

    /// Validate the patient form. On success the form is cleared and the
    /// cleaned record returned for the caller to submit.
    pub fn submit_patient(
        &mut self,
        form: NewPatientForm,
        today: NaiveDate,
    ) -> Result<NewPatient, ValidationReport> {
        match form.validate(today) {
            Ok(patient) => {
                info!(last_name = %patient.last_name, "Patient form accepted");
                self.patient_form = NewPatientForm::default();
                self.patient_report = None;
                Ok(patient)
            }
            Err(report) => {
                info!(errors = report.errors.len(), "Patient form rejected");
                self.patient_form = form;
                self.patient_report = Some(report.clone());
                Err(report)
            }
        }
    }

    /// Render the page for the current route in the current language.
    pub fn render(&self) -> View {
        let strings = self.context.language.strings();
        let config = &self.context.config;
        let path = self.context.router.current_path();
        let page = Page::for_path(&path, &config.login_path, &config.home_path);

        match (self.guard.state(), &page) {
            (GuardState::Loading, _) => return View::Loading(pages::loading(strings)),
            (GuardState::Unauthenticated, page) if *page != Page::Login => return View::Redirecting,
            _ => {}
        }

        let label = self.selector.label();
        let (title, body) = match &page {
            Page::Dashboard => match self.context.auth.current_user() {
                Some(user) => (strings.dashboard_title, pages::dashboard(strings, &user, &self.dashboard)),
                None => return View::Redirecting,
            },
            Page::NewPatient => (
                strings.new_patient_title,
                pages::new_patient(strings, &self.patient_form, self.patient_report.as_ref()),
            ),
            Page::Login => (strings.login_title, pages::login(strings, self.login_failed)),
            Page::NotFound(path) => (strings.app_title, pages::not_found(strings, path)),
        };

        View::Page {
            page,
            text: format!("{}\n{}", pages::header(strings, title, &label), body),
        }
    }

    /// Detach the guard and hand back the context for shutdown.
    pub fn unmount(self) -> Arc<AppContext> {
        self.guard.unmount();
        self.context
    }
}
