//! Signed-in session use-cases.
//!
//! # Responsibility
//! - Persist the signed-in profile as JSON under one session key.
//! - Read it back for screens that need the current user.
//!
//! # Invariants
//! - At most one profile is signed in at a time.
//! - Sign-out removes only the profile key; `reset` wipes the whole store.

use crate::model::profile::Profile;
use crate::repo::session_repo::{RepoError, SessionRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session key holding the serialized signed-in profile.
pub const PROFILE_KEY: &str = "profile";

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    Repo(RepoError),
    /// Profile could not be serialized for storage.
    Encode(serde_json::Error),
    /// Stored session value is not a profile.
    Corrupt(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode session profile: {err}"),
            Self::Corrupt(err) => write!(f, "stored session profile is corrupt: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Encode(err) | Self::Corrupt(err) => Some(err),
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Session facade over a key-value repository.
pub struct SessionService<R: SessionRepository> {
    repo: R,
}

impl<R: SessionRepository> SessionService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores `profile` as the signed-in user, replacing any previous one.
    pub fn sign_in(&self, profile: &Profile) -> SessionResult<()> {
        let encoded = serde_json::to_string(profile).map_err(SessionError::Encode)?;
        self.repo.set(PROFILE_KEY, &encoded)?;
        info!(
            "event=session_sign_in module=session status=ok profile_id={}",
            profile.id
        );
        Ok(())
    }

    /// Returns the signed-in profile, if any.
    pub fn current_profile(&self) -> SessionResult<Option<Profile>> {
        match self.repo.get(PROFILE_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(SessionError::Corrupt),
            None => Ok(None),
        }
    }

    pub fn sign_out(&self) -> SessionResult<()> {
        self.repo.remove(PROFILE_KEY)?;
        info!("event=session_sign_out module=session status=ok");
        Ok(())
    }

    /// Drops every session entry.
    pub fn reset(&self) -> SessionResult<()> {
        self.repo.clear()?;
        Ok(())
    }
}
