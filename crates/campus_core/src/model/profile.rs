//! Profile domain model (students and teachers).
//!
//! # Responsibility
//! - Define the persisted user record and its role helpers.
//! - Validate registration input before a profile is created.
//!
//! # Invariants
//! - `email` and `enrollment_number` together form the login credential.
//! - Teachers carry no career, semester or tutor; students carry no RFC.

use super::RecordId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Semesters offered for student placement.
pub const OFFERED_SEMESTERS: [u32; 3] = [2, 4, 6];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$").expect("valid email regex")
});

/// Role a profile plays in the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
}

/// User record persisted in `profiles.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: RecordId,
    pub name: String,
    pub surname: String,
    #[serde(rename = "id_grupos", default)]
    pub group_ids: Vec<RecordId>,
    /// Enrollment number; second half of the login credential.
    #[serde(rename = "matr")]
    pub enrollment_number: String,
    #[serde(default)]
    pub tutor_name: Option<String>,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub curp: String,
    #[serde(default)]
    pub rfc: Option<String>,
    #[serde(rename = "docs_ids", default)]
    pub document_ids: Vec<RecordId>,
    pub email: String,
    #[serde(default)]
    pub career_id: Option<RecordId>,
    #[serde(default)]
    pub semester: Option<u32>,
    #[serde(default)]
    pub is_teacher: bool,
}

impl Profile {
    pub fn role(&self) -> Role {
        if self.is_teacher {
            Role::Teacher
        } else {
            Role::Student
        }
    }

    /// `"<name> <surname>"` as shown on group cards.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Career and semester of a placed student.
    ///
    /// Returns `None` for teachers and for students with an empty career or
    /// a zero semester (legacy registrations stored those as placeholders).
    pub fn placement(&self) -> Option<(&str, u32)> {
        if self.is_teacher {
            return None;
        }
        let career = self.career_id.as_deref().filter(|id| !id.is_empty())?;
        let semester = self.semester.filter(|value| *value > 0)?;
        Some((career, semester))
    }

    pub fn has_credentials(&self, email: &str, enrollment_number: &str) -> bool {
        self.email == email && self.enrollment_number == enrollment_number
    }
}

/// Validation failure for registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// A required text field is empty after trimming.
    MissingField(&'static str),
    /// Email does not look like an address. Carries the rejected input;
    /// `Display` leaves it out so the message is safe to log.
    InvalidEmail(String),
    /// Student registration without a career.
    MissingCareer,
    /// Student semester outside `OFFERED_SEMESTERS`.
    UnsupportedSemester(Option<u32>),
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "field `{field}` is required"),
            Self::InvalidEmail(_) => write!(f, "invalid email address"),
            Self::MissingCareer => write!(f, "students must select a career"),
            Self::UnsupportedSemester(Some(value)) => {
                write!(f, "semester {value} is not offered; expected 2|4|6")
            }
            Self::UnsupportedSemester(None) => write!(f, "students must select a semester"),
        }
    }
}

impl Error for ProfileValidationError {}

/// Registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub enrollment_number: String,
    pub contact: String,
    pub curp: String,
    pub tutor_name: Option<String>,
    pub rfc: Option<String>,
    pub career_id: Option<RecordId>,
    pub semester: Option<u32>,
    pub is_teacher: bool,
}

impl RegistrationRequest {
    /// Returns a copy with surrounding whitespace removed and role-specific
    /// fields cleared.
    pub fn normalized(&self) -> Self {
        let trimmed = |value: &str| value.trim().to_string();
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };

        let mut request = Self {
            name: trimmed(&self.name),
            surname: trimmed(&self.surname),
            email: trimmed(&self.email),
            enrollment_number: trimmed(&self.enrollment_number),
            contact: trimmed(&self.contact),
            curp: trimmed(&self.curp),
            tutor_name: optional(&self.tutor_name),
            rfc: optional(&self.rfc),
            career_id: optional(&self.career_id),
            semester: self.semester,
            is_teacher: self.is_teacher,
        };

        if request.is_teacher {
            request.tutor_name = None;
            request.career_id = None;
            request.semester = None;
        } else {
            request.rfc = None;
        }
        request
    }

    /// Checks required fields on an already normalized request.
    ///
    /// Catalog membership of `career_id` is checked by the auth service,
    /// which owns the careers collection.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("surname", &self.surname),
            ("email", &self.email),
            ("matr", &self.enrollment_number),
            ("curp", &self.curp),
        ] {
            if value.is_empty() {
                return Err(ProfileValidationError::MissingField(field));
            }
        }

        if !EMAIL_RE.is_match(&self.email) {
            return Err(ProfileValidationError::InvalidEmail(self.email.clone()));
        }

        if !self.is_teacher {
            if self.career_id.is_none() {
                return Err(ProfileValidationError::MissingCareer);
            }
            match self.semester {
                Some(value) if OFFERED_SEMESTERS.contains(&value) => {}
                other => return Err(ProfileValidationError::UnsupportedSemester(other)),
            }
        }

        Ok(())
    }

    /// Builds the profile persisted for this request.
    pub fn into_profile(self, id: RecordId) -> Profile {
        Profile {
            id,
            name: self.name,
            surname: self.surname,
            group_ids: Vec::new(),
            enrollment_number: self.enrollment_number,
            tutor_name: self.tutor_name,
            contact: self.contact,
            curp: self.curp,
            rfc: self.rfc,
            document_ids: Vec::new(),
            email: self.email,
            career_id: self.career_id,
            semester: self.semester,
            is_teacher: self.is_teacher,
        }
    }
}
