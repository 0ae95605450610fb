//! Patient records and validation of the patient-creation form.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::i18n::{fill, LanguageStrings};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Raw input of the patient-creation form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatientForm {
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Cleaned form data ready for the patients API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PatientField {
    FirstName,
    LastName,
    DateOfBirth,
    Email,
    Phone,
}

impl PatientField {
    pub fn label(&self, strings: &LanguageStrings) -> &'static str {
        match self {
            PatientField::FirstName => strings.field_first_name,
            PatientField::LastName => strings.field_last_name,
            PatientField::DateOfBirth => strings.field_date_of_birth,
            PatientField::Email => strings.field_email,
            PatientField::Phone => strings.field_phone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Required,
    InvalidEmail,
    InvalidPhone,
    InvalidDate,
    FutureDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: PatientField,
    pub problem: FieldProblem,
}

impl FieldError {
    /// Message shown next to the field.
    pub fn message(&self, strings: &LanguageStrings) -> String {
        match self.problem {
            FieldProblem::Required => {
                fill(strings.error_required, &[("field", self.field.label(strings))])
            }
            FieldProblem::InvalidEmail => strings.error_invalid_email.to_string(),
            FieldProblem::InvalidPhone => strings.error_invalid_phone.to_string(),
            FieldProblem::InvalidDate => strings.error_invalid_date.to_string(),
            FieldProblem::FutureDate => strings.error_future_date.to_string(),
        }
    }
}

/// Every problem found in a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_for(&self, field: PatientField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    fn push(&mut self, field: PatientField, problem: FieldProblem) {
        self.errors.push(FieldError { field, problem });
    }
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

fn phone_regex() -> &'static Regex {
    // Optional leading +, then 7 to 15 digits with spaces or dashes between.
    PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^\+?[0-9](?:[ -]?[0-9]){6,14}$").expect("phone pattern is valid")
    })
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl NewPatientForm {
    /// Check the form against `today` and return the cleaned record, or
    /// every problem found.
    pub fn validate(&self, today: NaiveDate) -> Result<NewPatient, ValidationReport> {
        let mut report = ValidationReport::default();

        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            report.push(PatientField::FirstName, FieldProblem::Required);
        }

        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            report.push(PatientField::LastName, FieldProblem::Required);
        }

        let date_of_birth = match self.date_of_birth.trim() {
            "" => {
                report.push(PatientField::DateOfBirth, FieldProblem::Required);
                None
            }
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) if date > today => {
                    report.push(PatientField::DateOfBirth, FieldProblem::FutureDate);
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    report.push(PatientField::DateOfBirth, FieldProblem::InvalidDate);
                    None
                }
            },
        };

        let email = optional(&self.email);
        if let Some(email) = &email {
            if !email_regex().is_match(email) {
                report.push(PatientField::Email, FieldProblem::InvalidEmail);
            }
        }

        let phone = optional(&self.phone);
        if let Some(phone) = &phone {
            if !phone_regex().is_match(phone) {
                report.push(PatientField::Phone, FieldProblem::InvalidPhone);
            }
        }

        match date_of_birth {
            Some(date_of_birth) if !report.has_errors() => Ok(NewPatient {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                date_of_birth,
                email,
                phone,
                address: optional(&self.address),
            }),
            _ => Err(report),
        }
    }
}
