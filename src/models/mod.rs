//! Data shapes exchanged with the clinic API and rendered by the shells.

mod appointment;
mod dashboard;
mod patient;

pub use appointment::{Appointment, AppointmentStatus};
pub use dashboard::{ActivityKind, DashboardData, DashboardStats, QuickAction, RecentActivity};
pub use patient::{
    FieldError, FieldProblem, NewPatient, NewPatientForm, Patient, PatientField, ValidationReport,
};
