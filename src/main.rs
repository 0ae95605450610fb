//! Terminal front-end for the clinic portal.
//!
//! Usage:
//!   cargo run -- [start-path]
//!
//! Commands (one per line on stdin):
//!   go <path>                  navigate
//!   lang [es|en]               toggle, or set, the display language
//!   login <email> <password>   sign in with the demo account
//!   logout                     end the session
//!   patient <first>;<last>;<YYYY-MM-DD>;<email>;<phone>;<address>
//!   show                       render the current page again
//!   quit
//!
//! Optional environment variables:
//! - LOGIN_PATH, HOME_PATH, DEFAULT_LANGUAGE, AUTH_TIMEOUT_SECS
//! - DEMO_USER_ID (starts with a restored session for this user)
//! - DEMO_USER_EMAIL, DEMO_USER_PASSWORD (account accepted by `login`)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use clinic_portal::auth::{StaticAuthProvider, User};
use clinic_portal::config::Config;
use clinic_portal::models::{
    ActivityKind, Appointment, AppointmentStatus, DashboardData, DashboardStats, NewPatientForm,
    QuickAction, RecentActivity,
};
use clinic_portal::router::MemoryRouter;
use clinic_portal::shell::{AppShell, View, NEW_PATIENT_PATH};
use clinic_portal::AppContext;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only rendered pages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_portal=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let start_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.home_path.clone());

    let provider = demo_provider(&config);
    let router = Arc::new(MemoryRouter::new(start_path));
    let context = Arc::new(AppContext::new(config, router));
    let mut shell = AppShell::mount(Arc::clone(&context), demo_dashboard());

    print_view(&shell.render());
    context.resolve_session(&provider).await;
    print_view(&shell.render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "show" => {}
            "go" => shell.navigate(rest.trim()),
            "lang" => match rest.trim() {
                "" => {
                    shell.selector().activate();
                }
                code => {
                    if let Err(e) = context.language.set_language(code) {
                        eprintln!("{}", e);
                    }
                }
            },
            "login" => {
                let mut parts = rest.split_whitespace();
                let email = parts.next().unwrap_or_default();
                let password = parts.next().unwrap_or_default();
                match provider.authenticate(email, password) {
                    Ok(user) => {
                        shell.set_login_failed(false);
                        context.auth.sign_in(user);
                        shell.navigate(&context.config.home_path);
                    }
                    Err(_) => shell.set_login_failed(true),
                }
            }
            "logout" => {
                provider.end_session();
                context.auth.sign_out();
            }
            "patient" => {
                let form = parse_patient_form(rest);
                if let Ok(patient) = shell.submit_patient(form, Utc::now().date_naive()) {
                    println!("{}", serde_json::to_string_pretty(&patient)?);
                }
                if context.router.current_path() != NEW_PATIENT_PATH {
                    shell.navigate(NEW_PATIENT_PATH);
                }
            }
            other => eprintln!("unknown command: {}", other),
        }

        print_view(&shell.render());
    }

    let context = shell.unmount();
    let report = context.shutdown();
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn print_view(view: &View) {
    match view {
        View::Redirecting => info!("Redirecting to login"),
        view => println!("{}", view.text()),
    }
}

fn demo_provider(config: &Config) -> StaticAuthProvider {
    let mut provider = StaticAuthProvider::new().with_latency(Duration::from_millis(300));

    if let (Some(email), Some(password)) = (&config.demo_user_email, &config.demo_user_password) {
        let id = config.demo_user_id.clone().unwrap_or_else(|| "demo".to_string());
        provider = provider.with_account(User::new(id).with_email(email.clone()), password.clone());
    }
    if let Some(id) = &config.demo_user_id {
        let mut user = User::new(id.clone());
        user.email = config.demo_user_email.clone();
        provider = provider.with_session(user);
    }

    provider
}

fn parse_patient_form(input: &str) -> NewPatientForm {
    let mut fields = input.split(';').map(|field| field.trim().to_string());
    let mut next = || fields.next().unwrap_or_default();
    NewPatientForm {
        first_name: next(),
        last_name: next(),
        date_of_birth: next(),
        email: next(),
        phone: next(),
        address: next(),
    }
}

fn demo_dashboard() -> DashboardData {
    let now = Utc::now();
    let appointment = |id: &str, patient: &str, hours: i64, status, reason: &str| Appointment {
        id: id.to_string(),
        patient_id: patient.to_string(),
        doctor_id: "d-01".to_string(),
        scheduled_at: now + ChronoDuration::hours(hours),
        duration_minutes: 30,
        status,
        appointment_type: Some("consultation".to_string()),
        reason: Some(reason.to_string()),
        notes: None,
        created_at: now,
        updated_at: now,
    };

    DashboardData {
        stats: DashboardStats {
            total_patients: 128,
            appointments_today: 9,
            pending_appointments: 4,
            completed_appointments: 5,
        },
        upcoming: vec![
            appointment("a-101", "p-042", 1, AppointmentStatus::Confirmed, "Control anual"),
            appointment("a-102", "p-017", 3, AppointmentStatus::Scheduled, "Revisión de análisis"),
        ],
        recent_activity: vec![RecentActivity {
            id: "r-1".to_string(),
            kind: ActivityKind::PatientCreated,
            description: "p-128 Marta Gil".to_string(),
            timestamp: now - ChronoDuration::minutes(20),
        }],
        quick_actions: vec![QuickAction {
            id: "new-patient".to_string(),
            label: "+ Paciente / Patient".to_string(),
            path: NEW_PATIENT_PATH.to_string(),
        }],
    }
}
