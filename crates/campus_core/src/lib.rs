//! Core domain logic for the campus school-management app.
//! This crate owns the record store, its query filters and the use-case
//! services the mobile screens call.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use config::AppPaths;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{Career, Group, Subject};
pub use model::document::{DocumentRecord, DocumentUpload};
pub use model::enrollment::Enrollment;
pub use model::next_record_id;
pub use model::profile::{Profile, ProfileValidationError, RegistrationRequest, Role};
pub use model::wellbeing::{EmotionalStatus, Mood, MoodSummary};
pub use repo::session_repo::{RepoError, RepoResult, SessionRepository, SqliteSessionRepository};
pub use service::auth_service::{AuthError, AuthResult, AuthService};
pub use service::document_service::{DocumentError, DocumentResult, DocumentService};
pub use service::enrollment_service::{
    Dashboard, EnrollmentError, EnrollmentResult, EnrollmentService, GroupCard,
};
pub use service::session_service::{SessionError, SessionResult, SessionService};
pub use service::wellbeing_service::{WellbeingError, WellbeingResult, WellbeingService};
pub use store::{DocumentStore, JsonDocumentStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
