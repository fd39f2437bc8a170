//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose login, registration, dashboard, wellbeing and document flows to
//!   Dart via FRB.
//! - Turn core errors into envelope messages the UI shows as alerts.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the store and session database for its own duration.

use campus_core::db::open_db;
use campus_core::store::Profiles;
use campus_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppPaths, AuthService, Dashboard, DocumentRecord, DocumentService, DocumentStore, DocumentUpload,
    EmotionalStatus, EnrollmentService, GroupCard, JsonDocumentStore, Mood, Profile,
    RegistrationRequest, SessionService, SqliteSessionRepository, WellbeingService,
};
use log::warn;
use std::sync::OnceLock;

static APP_PATHS: OnceLock<AppPaths> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Profile fields the screens render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub enrollment_number: String,
    pub is_teacher: bool,
    pub career_id: Option<String>,
    pub semester: Option<u32>,
}

/// Result of login/registration/session lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub ok: bool,
    pub profile: Option<ProfileView>,
    pub message: String,
}

/// Registration form as submitted by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub enrollment_number: String,
    pub contact: String,
    pub curp: String,
    pub tutor_name: Option<String>,
    pub rfc: Option<String>,
    pub career_id: Option<String>,
    pub semester: Option<u32>,
    pub is_teacher: bool,
}

/// Group card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCardView {
    pub group_id: String,
    pub subject_name: String,
    pub teacher_name: String,
    pub schedule: u32,
}

/// Dashboard envelope.
///
/// Teachers get their groups in `taught`; students get `available` and
/// `enrolled`. The lists of the other role stay empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub is_teacher: bool,
    pub taught: Vec<GroupCardView>,
    pub available: Vec<GroupCardView>,
    pub enrolled: Vec<GroupCardView>,
    pub message: String,
}

/// Generic action envelope for single-record writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub record_id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, record_id: String) -> Self {
        Self {
            ok: true,
            record_id: Some(record_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            record_id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntryView {
    pub id: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `Bien` or `Mal`.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub id: String,
    pub date: String,
    pub file_name: String,
    pub file_url: String,
}

/// Profile-screen envelope: mood history, counters and documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellbeingResponse {
    pub ok: bool,
    pub entries: Vec<MoodEntryView>,
    pub good_count: u32,
    pub bad_count: u32,
    /// Truncated share of `Bien` entries; 0 without entries.
    pub good_percent: u32,
    pub bad_percent: u32,
    pub documents: Vec<DocumentView>,
    pub message: String,
}

/// Signs in with email and enrollment number.
///
/// # FFI contract
/// - Sync call, file and DB backed.
/// - Never panics; `ok=false` carries the alert message.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_login(email: String, enrollment_number: String) -> AuthResponse {
    auth_login_at(resolve_paths(), &email, &enrollment_number)
}

/// Registers a profile and signs it in.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_register(input: RegisterInput) -> AuthResponse {
    auth_register_at(resolve_paths(), input)
}

/// Returns the signed-in profile, `ok=false` when nobody is signed in.
#[flutter_rust_bridge::frb(sync)]
pub fn session_profile() -> AuthResponse {
    session_profile_at(resolve_paths())
}

/// Signs out. Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn session_logout() -> String {
    match session_logout_at(resolve_paths()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Loads the dashboard for `profile_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_load(profile_id: String) -> DashboardResponse {
    dashboard_load_at(resolve_paths(), &profile_id)
}

/// Enrolls `student_id` into `group_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn enroll_group(student_id: String, group_id: String) -> ActionResponse {
    enroll_group_at(resolve_paths(), &student_id, &group_id)
}

/// Records today's mood (`Bien`/`Mal`, `good`/`bad` also accepted).
#[flutter_rust_bridge::frb(sync)]
pub fn mood_record(student_id: String, status: String) -> ActionResponse {
    mood_record_at(resolve_paths(), &student_id, &status)
}

/// Loads mood history, counters and documents for the profile screen.
#[flutter_rust_bridge::frb(sync)]
pub fn wellbeing_load(student_id: String) -> WellbeingResponse {
    wellbeing_load_at(resolve_paths(), &student_id)
}

/// Stores metadata for a picked file. Empty name or url means cancelled.
#[flutter_rust_bridge::frb(sync)]
pub fn document_upload(student_id: String, file_name: String, file_url: String) -> ActionResponse {
    document_upload_at(resolve_paths(), &student_id, &file_name, &file_url)
}

fn resolve_paths() -> &'static AppPaths {
    APP_PATHS.get_or_init(AppPaths::from_env)
}

fn open_store(paths: &AppPaths) -> Result<JsonDocumentStore, String> {
    JsonDocumentStore::open(paths.documents_dir()).map_err(|err| format!("store open failed: {err}"))
}

fn with_auth_service<T>(
    paths: &AppPaths,
    f: impl FnOnce(&AuthService<JsonDocumentStore, SqliteSessionRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let store = open_store(paths)?;
    let conn = open_db(paths.session_db_path())
        .map_err(|err| format!("session DB open failed: {err}"))?;
    let repo = SqliteSessionRepository::try_new(&conn)
        .map_err(|err| format!("session repo init failed: {err}"))?;
    let service = AuthService::new(store, SessionService::new(repo));
    f(&service)
}

fn auth_response(result: Result<Profile, String>, success: &str) -> AuthResponse {
    match result {
        Ok(profile) => AuthResponse {
            ok: true,
            profile: Some(to_profile_view(&profile)),
            message: success.to_string(),
        },
        Err(message) => AuthResponse {
            ok: false,
            profile: None,
            message,
        },
    }
}

fn auth_login_at(paths: &AppPaths, email: &str, enrollment_number: &str) -> AuthResponse {
    let result = with_auth_service(paths, |service| {
        service
            .login(email, enrollment_number)
            .map_err(|err| err.to_string())
    });
    if let Err(message) = &result {
        warn!("event=ffi_auth_login module=ffi status=error error={message}");
    }
    auth_response(result, "Signed in.")
}

fn auth_register_at(paths: &AppPaths, input: RegisterInput) -> AuthResponse {
    let request = RegistrationRequest {
        name: input.name,
        surname: input.surname,
        email: input.email,
        enrollment_number: input.enrollment_number,
        contact: input.contact,
        curp: input.curp,
        tutor_name: input.tutor_name,
        rfc: input.rfc,
        career_id: input.career_id,
        semester: input.semester,
        is_teacher: input.is_teacher,
    };
    let result = with_auth_service(paths, |service| {
        service.register(&request).map_err(|err| err.to_string())
    });
    if let Err(message) = &result {
        warn!("event=ffi_auth_register module=ffi status=error error={message}");
    }
    auth_response(result, "Registered.")
}

fn session_profile_at(paths: &AppPaths) -> AuthResponse {
    let result = with_auth_service(paths, |service| {
        service
            .current_profile()
            .map_err(|err| err.to_string())?
            .ok_or_else(|| "No active session.".to_string())
    });
    auth_response(result, "Session active.")
}

fn session_logout_at(paths: &AppPaths) -> Result<(), String> {
    with_auth_service(paths, |service| service.logout().map_err(|err| err.to_string()))
}

fn dashboard_load_at(paths: &AppPaths, profile_id: &str) -> DashboardResponse {
    let result = open_store(paths).and_then(|store| {
        let profile = store
            .load::<Profiles>()
            .map_err(|err| err.to_string())?
            .into_iter()
            .find(|profile| profile.id == profile_id)
            .ok_or_else(|| format!("profile not found: {profile_id}"))?;
        EnrollmentService::new(&store)
            .dashboard(&profile)
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(Dashboard::Teacher { groups }) => DashboardResponse {
            ok: true,
            is_teacher: true,
            taught: to_card_views(&groups),
            available: Vec::new(),
            enrolled: Vec::new(),
            message: format!("{} group(s).", groups.len()),
        },
        Ok(Dashboard::Student {
            available,
            enrolled,
            ..
        }) => DashboardResponse {
            ok: true,
            is_teacher: false,
            taught: Vec::new(),
            message: format!(
                "{} available, {} enrolled.",
                available.len(),
                enrolled.len()
            ),
            available: to_card_views(&available),
            enrolled: to_card_views(&enrolled),
        },
        Err(message) => {
            warn!("event=ffi_dashboard_load module=ffi status=error error={message}");
            DashboardResponse {
                ok: false,
                is_teacher: false,
                taught: Vec::new(),
                available: Vec::new(),
                enrolled: Vec::new(),
                message,
            }
        }
    }
}

fn enroll_group_at(paths: &AppPaths, student_id: &str, group_id: &str) -> ActionResponse {
    let result = open_store(paths).and_then(|store| {
        EnrollmentService::new(store)
            .enroll(student_id, group_id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(enrollment) => ActionResponse::success("Enrolled.", enrollment.id),
        Err(message) => {
            warn!("event=ffi_enroll module=ffi status=error error={message}");
            ActionResponse::failure(message)
        }
    }
}

fn mood_record_at(paths: &AppPaths, student_id: &str, status: &str) -> ActionResponse {
    let mood = match status.parse::<Mood>() {
        Ok(mood) => mood,
        Err(err) => return ActionResponse::failure(err.to_string()),
    };
    let result = open_store(paths).and_then(|store| {
        WellbeingService::new(store)
            .record_mood_today(student_id, mood)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(entry) => ActionResponse::success("Thanks for sharing.", entry.id),
        Err(message) => {
            warn!("event=ffi_mood_record module=ffi status=error error={message}");
            ActionResponse::failure(message)
        }
    }
}

fn wellbeing_load_at(paths: &AppPaths, student_id: &str) -> WellbeingResponse {
    let result = open_store(paths).and_then(|store| {
        let wellbeing = WellbeingService::new(&store);
        let entries = wellbeing.history(student_id).map_err(|err| err.to_string())?;
        let summary = wellbeing.summary(student_id).map_err(|err| err.to_string())?;
        let documents = DocumentService::new(&store)
            .list(student_id)
            .map_err(|err| err.to_string())?;
        Ok((entries, summary, documents))
    });

    match result {
        Ok((entries, summary, documents)) => {
            let (good_percent, bad_percent) = summary.percentages();
            WellbeingResponse {
                ok: true,
                entries: entries.iter().map(to_mood_view).collect(),
                good_count: summary.good as u32,
                bad_count: summary.bad as u32,
                good_percent,
                bad_percent,
                documents: documents.iter().map(to_document_view).collect(),
                message: format!("{} entries.", summary.total()),
            }
        }
        Err(message) => {
            warn!("event=ffi_wellbeing_load module=ffi status=error error={message}");
            WellbeingResponse {
                ok: false,
                entries: Vec::new(),
                good_count: 0,
                bad_count: 0,
                good_percent: 0,
                bad_percent: 0,
                documents: Vec::new(),
                message,
            }
        }
    }
}

fn document_upload_at(
    paths: &AppPaths,
    student_id: &str,
    file_name: &str,
    file_url: &str,
) -> ActionResponse {
    let upload = DocumentUpload::new(file_name, file_url);
    let result = open_store(paths).and_then(|store| {
        DocumentService::new(store)
            .upload_today(student_id, &upload)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(record) => ActionResponse::success("Document uploaded.", record.id),
        Err(message) => {
            warn!("event=ffi_document_upload module=ffi status=error error={message}");
            ActionResponse::failure(message)
        }
    }
}

fn to_profile_view(profile: &Profile) -> ProfileView {
    ProfileView {
        id: profile.id.clone(),
        name: profile.name.clone(),
        surname: profile.surname.clone(),
        email: profile.email.clone(),
        enrollment_number: profile.enrollment_number.clone(),
        is_teacher: profile.is_teacher,
        career_id: profile.career_id.clone(),
        semester: profile.semester,
    }
}

fn to_card_views(cards: &[GroupCard]) -> Vec<GroupCardView> {
    cards
        .iter()
        .map(|card| GroupCardView {
            group_id: card.group_id.clone(),
            subject_name: card.subject_name.clone().unwrap_or_default(),
            teacher_name: card.teacher_name.clone().unwrap_or_default(),
            schedule: card.schedule,
        })
        .collect()
}

fn to_mood_view(entry: &EmotionalStatus) -> MoodEntryView {
    MoodEntryView {
        id: entry.id.clone(),
        date: entry.date.format("%Y-%m-%d").to_string(),
        status: entry.status.label().to_string(),
    }
}

fn to_document_view(record: &DocumentRecord) -> DocumentView {
    DocumentView {
        id: record.id.clone(),
        date: record.date.format("%Y-%m-%d").to_string(),
        file_name: record.file_name.clone(),
        file_url: record.file_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        auth_login_at, auth_register_at, core_version, dashboard_load_at, document_upload_at,
        enroll_group_at, init_logging, mood_record_at, ping, session_logout_at,
        session_profile_at, wellbeing_load_at, RegisterInput,
    };
    use campus_core::AppPaths;
    use tempfile::TempDir;

    fn temp_paths() -> (TempDir, AppPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path());
        (dir, paths)
    }

    fn student_input(email: &str, matr: &str) -> RegisterInput {
        RegisterInput {
            name: "Sofia".to_string(),
            surname: "Cruz".to_string(),
            email: email.to_string(),
            enrollment_number: matr.to_string(),
            curp: "CUSO050505MDFRFF02".to_string(),
            career_id: Some("1".to_string()),
            semester: Some(2),
            ..RegisterInput::default()
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn register_login_and_logout_round_through_session() {
        let (_dir, paths) = temp_paths();

        let registered = auth_register_at(&paths, student_input("sofia@campus.mx", "4001"));
        assert!(registered.ok, "{}", registered.message);
        let profile = registered.profile.expect("registered profile");

        let session = session_profile_at(&paths);
        assert_eq!(session.profile.as_ref(), Some(&profile));

        assert_eq!(session_logout_at(&paths), Ok(()));
        assert!(!session_profile_at(&paths).ok);

        let login = auth_login_at(&paths, "sofia@campus.mx", "4001");
        assert!(login.ok, "{}", login.message);
        assert_eq!(login.profile, Some(profile));
    }

    #[test]
    fn duplicate_registration_and_bad_login_report_messages() {
        let (_dir, paths) = temp_paths();

        let duplicate = auth_register_at(&paths, student_input("ana.lopez@campus.mx", "4002"));
        assert!(!duplicate.ok);
        assert!(duplicate.message.contains("already registered"));

        let login = auth_login_at(&paths, "ana.lopez@campus.mx", "0000");
        assert!(!login.ok);
        assert!(login.profile.is_none());
    }

    #[test]
    fn invalid_email_message_does_not_echo_input() {
        let (_dir, paths) = temp_paths();

        let response = auth_register_at(&paths, student_input("sofia.private@@campus", "4003"));
        assert!(!response.ok);
        assert_eq!(response.message, "invalid email address");
        assert!(!response.message.contains("sofia.private"));
    }

    #[test]
    fn enrolling_updates_dashboard() {
        let (_dir, paths) = temp_paths();

        let before = dashboard_load_at(&paths, "3");
        assert!(before.ok, "{}", before.message);
        assert!(!before.is_teacher);
        assert_eq!(before.available.len(), 2);

        let enrolled = enroll_group_at(&paths, "3", "2");
        assert!(enrolled.ok, "{}", enrolled.message);
        assert!(!enroll_group_at(&paths, "3", "2").ok);

        let after = dashboard_load_at(&paths, "3");
        assert_eq!(after.available.len(), 1);
        assert_eq!(after.enrolled.len(), 2);

        let teacher = dashboard_load_at(&paths, "1");
        assert!(teacher.is_teacher);
        assert_eq!(teacher.taught.len(), 2);
        assert_eq!(teacher.taught[0].teacher_name, "Maria Hernandez");
    }

    #[test]
    fn mood_and_documents_feed_wellbeing_screen() {
        let (_dir, paths) = temp_paths();

        let mood = mood_record_at(&paths, "4", "Bien");
        assert!(mood.ok, "{}", mood.message);
        assert!(!mood_record_at(&paths, "4", "Mal").ok);
        assert!(!mood_record_at(&paths, "4", "meh").ok);

        assert!(!document_upload_at(&paths, "4", "", "").ok);
        let upload = document_upload_at(&paths, "4", "boleta.pdf", "file:///boleta.pdf");
        assert!(upload.ok, "{}", upload.message);

        let screen = wellbeing_load_at(&paths, "4");
        assert!(screen.ok, "{}", screen.message);
        assert_eq!(screen.good_count, 1);
        assert_eq!(screen.bad_count, 0);
        assert_eq!((screen.good_percent, screen.bad_percent), (100, 0));
        assert_eq!(screen.entries[0].status, "Bien");
        assert_eq!(screen.documents.len(), 1);
        assert_eq!(screen.documents[0].file_name, "boleta.pdf");
    }

    #[test]
    fn dashboard_for_unknown_profile_fails_softly() {
        let (_dir, paths) = temp_paths();
        let response = dashboard_load_at(&paths, "404");
        assert!(!response.ok);
        assert!(response.message.contains("404"));
    }
}
