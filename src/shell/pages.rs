//! Plain-text renderers for each page. Inputs are borrowed and never changed.

use crate::auth::User;
use crate::i18n::{fill, LanguageStrings};
use crate::models::{DashboardData, NewPatientForm, PatientField, ValidationReport};

/// Title bar shared by every page, with the language selector caption.
pub fn header(strings: &LanguageStrings, title: &str, selector_label: &str) -> String {
    format!("== {} · {} ==   [{}]\n", strings.app_title, title, selector_label)
}

pub fn loading(strings: &LanguageStrings) -> String {
    format!("{}\n", strings.loading)
}

pub fn dashboard(strings: &LanguageStrings, user: &User, data: &DashboardData) -> String {
    let stats = &data.stats;
    let mut out = format!("{}\n\n", fill(strings.welcome, &[("name", user.greeting_name())]));

    for (label, value) in [
        (strings.stats_total_patients, stats.total_patients),
        (strings.stats_appointments_today, stats.appointments_today),
        (strings.stats_pending_appointments, stats.pending_appointments),
        (strings.stats_completed_appointments, stats.completed_appointments),
    ] {
        out.push_str(&format!("{:<26} {}\n", label, value));
    }

    out.push_str(&format!("\n{}\n", strings.upcoming_appointments));
    if data.upcoming.is_empty() {
        out.push_str(&format!("  {}\n", strings.no_appointments));
    }
    for appointment in &data.upcoming {
        let minutes = appointment.duration_minutes.to_string();
        let reason = appointment
            .reason
            .as_deref()
            .map(|reason| format!(" {}", reason))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {}  {}  ({})  [{}]{}\n",
            appointment.scheduled_at.format("%Y-%m-%d %H:%M"),
            appointment.patient_id,
            fill(strings.duration_minutes, &[("minutes", minutes.as_str())]),
            appointment.status.label(strings),
            reason,
        ));
    }

    out.push_str(&format!("\n{}\n", strings.recent_activity));
    if data.recent_activity.is_empty() {
        out.push_str(&format!("  {}\n", strings.no_recent_activity));
    }
    for activity in &data.recent_activity {
        out.push_str(&format!(
            "  {}  {}\n",
            activity.timestamp.format("%Y-%m-%d %H:%M"),
            activity.description
        ));
    }

    if !data.quick_actions.is_empty() {
        out.push_str(&format!("\n{}\n", strings.quick_actions));
        for action in &data.quick_actions {
            out.push_str(&format!("  > {} ({})\n", action.label, action.path));
        }
    }

    out
}

pub fn new_patient(
    strings: &LanguageStrings,
    form: &NewPatientForm,
    report: Option<&ValidationReport>,
) -> String {
    let fields: [(&str, &str, Option<PatientField>); 6] = [
        (strings.field_first_name, form.first_name.as_str(), Some(PatientField::FirstName)),
        (strings.field_last_name, form.last_name.as_str(), Some(PatientField::LastName)),
        (strings.field_date_of_birth, form.date_of_birth.as_str(), Some(PatientField::DateOfBirth)),
        (strings.field_email, form.email.as_str(), Some(PatientField::Email)),
        (strings.field_phone, form.phone.as_str(), Some(PatientField::Phone)),
        (strings.field_address, form.address.as_str(), None),
    ];

    let mut out = String::new();
    for (label, value, field) in fields {
        out.push_str(&format!("{:<22} [{}]\n", label, value));
        let error = field.and_then(|field| report.and_then(|r| r.error_for(field)));
        if let Some(error) = error {
            out.push_str(&format!("{:<22} ! {}\n", "", error.message(strings)));
        }
    }
    out.push_str(&format!("\n[ {} ]\n", strings.save_patient));
    out
}

pub fn login(strings: &LanguageStrings, failed: bool) -> String {
    let mut out = format!("{}\n", strings.login_prompt);
    if failed {
        out.push_str(&format!("! {}\n", strings.login_failed));
    }
    out
}

pub fn not_found(strings: &LanguageStrings, path: &str) -> String {
    format!("{}\n", fill(strings.not_found, &[("path", path)]))
}
