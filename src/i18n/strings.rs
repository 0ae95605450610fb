/// All localized user-facing strings for a language.
///
/// Placeholders are written as `{name}` and filled with [`fill`].
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Chrome ====================
    /// Application title shown in every page header
    pub app_title: &'static str,

    /// Shown while the session is still being resolved
    pub loading: &'static str,

    /// Caption in front of the language selector button
    /// Placeholders: {language}
    pub switch_language: &'static str,

    // ==================== Dashboard ====================
    pub dashboard_title: &'static str,

    /// Placeholders: {name}
    pub welcome: &'static str,

    pub stats_total_patients: &'static str,
    pub stats_appointments_today: &'static str,
    pub stats_pending_appointments: &'static str,
    pub stats_completed_appointments: &'static str,

    pub upcoming_appointments: &'static str,
    pub no_appointments: &'static str,
    pub recent_activity: &'static str,
    pub no_recent_activity: &'static str,
    pub quick_actions: &'static str,

    /// Placeholders: {minutes}
    pub duration_minutes: &'static str,

    // ==================== Appointment Status ====================
    pub status_scheduled: &'static str,
    pub status_confirmed: &'static str,
    pub status_in_progress: &'static str,
    pub status_completed: &'static str,
    pub status_cancelled: &'static str,
    pub status_no_show: &'static str,

    // ==================== Patient Form ====================
    pub new_patient_title: &'static str,
    pub field_first_name: &'static str,
    pub field_last_name: &'static str,
    pub field_date_of_birth: &'static str,
    pub field_email: &'static str,
    pub field_phone: &'static str,
    pub field_address: &'static str,
    pub save_patient: &'static str,

    /// Placeholders: {field}
    pub error_required: &'static str,
    pub error_invalid_email: &'static str,
    pub error_invalid_phone: &'static str,
    pub error_invalid_date: &'static str,
    pub error_future_date: &'static str,

    // ==================== Login ====================
    pub login_title: &'static str,
    pub login_prompt: &'static str,
    pub login_failed: &'static str,

    // ==================== Other ====================
    /// Placeholders: {path}
    pub not_found: &'static str,
}

/// Replace each `{key}` placeholder in `template` with its value.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{}}}", key), value)
        })
}

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    app_title: "Clínica",
    loading: "Cargando sesión...",
    switch_language: "Cambiar a {language}",

    dashboard_title: "Panel principal",
    welcome: "Bienvenido, {name}",
    stats_total_patients: "Pacientes totales",
    stats_appointments_today: "Citas de hoy",
    stats_pending_appointments: "Citas pendientes",
    stats_completed_appointments: "Citas completadas",
    upcoming_appointments: "Próximas citas",
    no_appointments: "No hay citas programadas",
    recent_activity: "Actividad reciente",
    no_recent_activity: "Sin actividad reciente",
    quick_actions: "Acciones rápidas",
    duration_minutes: "{minutes} min",

    status_scheduled: "Programada",
    status_confirmed: "Confirmada",
    status_in_progress: "En curso",
    status_completed: "Completada",
    status_cancelled: "Cancelada",
    status_no_show: "No asistió",

    new_patient_title: "Nuevo paciente",
    field_first_name: "Nombre",
    field_last_name: "Apellidos",
    field_date_of_birth: "Fecha de nacimiento",
    field_email: "Correo electrónico",
    field_phone: "Teléfono",
    field_address: "Dirección",
    save_patient: "Guardar paciente",
    error_required: "{field} es obligatorio",
    error_invalid_email: "El correo electrónico no es válido",
    error_invalid_phone: "El teléfono no es válido",
    error_invalid_date: "La fecha debe tener el formato AAAA-MM-DD",
    error_future_date: "La fecha de nacimiento no puede estar en el futuro",

    login_title: "Iniciar sesión",
    login_prompt: "Introduce tu correo y contraseña para continuar",
    login_failed: "Correo o contraseña incorrectos",

    not_found: "Página no encontrada: {path}",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    app_title: "Clinic",
    loading: "Loading session...",
    switch_language: "Switch to {language}",

    dashboard_title: "Dashboard",
    welcome: "Welcome, {name}",
    stats_total_patients: "Total patients",
    stats_appointments_today: "Appointments today",
    stats_pending_appointments: "Pending appointments",
    stats_completed_appointments: "Completed appointments",
    upcoming_appointments: "Upcoming appointments",
    no_appointments: "No appointments scheduled",
    recent_activity: "Recent activity",
    no_recent_activity: "No recent activity",
    quick_actions: "Quick actions",
    duration_minutes: "{minutes} min",

    status_scheduled: "Scheduled",
    status_confirmed: "Confirmed",
    status_in_progress: "In progress",
    status_completed: "Completed",
    status_cancelled: "Cancelled",
    status_no_show: "No show",

    new_patient_title: "New patient",
    field_first_name: "First name",
    field_last_name: "Last name",
    field_date_of_birth: "Date of birth",
    field_email: "Email",
    field_phone: "Phone",
    field_address: "Address",
    save_patient: "Save patient",
    error_required: "{field} is required",
    error_invalid_email: "Email address is not valid",
    error_invalid_phone: "Phone number is not valid",
    error_invalid_date: "Date must use the YYYY-MM-DD format",
    error_future_date: "Date of birth cannot be in the future",

    login_title: "Sign in",
    login_prompt: "Enter your email and password to continue",
    login_failed: "Incorrect email or password",

    not_found: "Page not found: {path}",
};
