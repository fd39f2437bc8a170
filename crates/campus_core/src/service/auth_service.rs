//! Login and registration use-cases.
//!
//! # Responsibility
//! - Match login credentials against stored profiles.
//! - Validate and append new profiles on registration.
//! - Sign the resulting profile into the session store.
//!
//! # Invariants
//! - Login succeeds only when email and enrollment number both match.
//! - Registration never creates a second profile with the same email or
//!   enrollment number.

use crate::model::next_record_id;
use crate::model::profile::{Profile, ProfileValidationError, RegistrationRequest};
use crate::query::{find_by_credentials, find_registration_conflict};
use crate::repo::session_repo::SessionRepository;
use crate::service::session_service::{SessionError, SessionService};
use crate::store::{Careers, DocumentStore, Profiles, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug)]
pub enum AuthError {
    /// No profile matches the email/enrollment-number pair.
    InvalidCredentials,
    /// Email or enrollment number already belongs to a profile.
    AlreadyRegistered,
    /// Student picked a career missing from the catalog.
    UnknownCareer(String),
    Validation(ProfileValidationError),
    Store(StoreError),
    Session(SessionError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "email or enrollment number is incorrect"),
            Self::AlreadyRegistered => write!(f, "email or enrollment number already registered"),
            Self::UnknownCareer(id) => write!(f, "unknown career `{id}`"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProfileValidationError> for AuthError {
    fn from(value: ProfileValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SessionError> for AuthError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

/// Auth facade over the profile document and the session store.
pub struct AuthService<S: DocumentStore, R: SessionRepository> {
    store: S,
    session: SessionService<R>,
}

impl<S: DocumentStore, R: SessionRepository> AuthService<S, R> {
    pub fn new(store: S, session: SessionService<R>) -> Self {
        Self { store, session }
    }

    pub fn session(&self) -> &SessionService<R> {
        &self.session
    }

    /// Signs in the profile matching `email` and `enrollment_number`.
    ///
    /// Inputs are trimmed; comparison is otherwise exact.
    pub fn login(&self, email: &str, enrollment_number: &str) -> AuthResult<Profile> {
        let profiles = self.store.load::<Profiles>()?;
        let Some(profile) = find_by_credentials(&profiles, email.trim(), enrollment_number.trim())
        else {
            warn!("event=auth_login module=auth status=rejected reason=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };

        self.session.sign_in(profile)?;
        info!(
            "event=auth_login module=auth status=ok profile_id={}",
            profile.id
        );
        Ok(profile.clone())
    }

    /// Registers a new profile and signs it in.
    ///
    /// # Contract
    /// - Request is normalized, then validated.
    /// - Students must reference a career present in the careers catalog.
    /// - Duplicate email or enrollment number returns `AlreadyRegistered`
    ///   without touching storage.
    /// - On success the session store is cleared before signing in.
    pub fn register(&self, request: &RegistrationRequest) -> AuthResult<Profile> {
        let request = request.normalized();
        request.validate()?;

        if let Some(career_id) = request.career_id.as_deref() {
            let careers = self.store.load::<Careers>()?;
            if !careers.iter().any(|career| career.id == career_id) {
                return Err(AuthError::UnknownCareer(career_id.to_string()));
            }
        }

        let mut profiles = self.store.load::<Profiles>()?;
        if find_registration_conflict(&profiles, &request.email, &request.enrollment_number)
            .is_some()
        {
            warn!("event=auth_register module=auth status=rejected reason=already_registered");
            return Err(AuthError::AlreadyRegistered);
        }

        let id = next_record_id(profiles.iter().map(|profile| profile.id.as_str()));
        let profile = request.into_profile(id);
        profiles.push(profile.clone());
        self.store.save::<Profiles>(&profiles)?;

        self.session.reset()?;
        self.session.sign_in(&profile)?;
        info!(
            "event=auth_register module=auth status=ok profile_id={} is_teacher={}",
            profile.id, profile.is_teacher
        );
        Ok(profile)
    }

    pub fn current_profile(&self) -> AuthResult<Option<Profile>> {
        Ok(self.session.current_profile()?)
    }

    pub fn logout(&self) -> AuthResult<()> {
        Ok(self.session.sign_out()?)
    }
}
