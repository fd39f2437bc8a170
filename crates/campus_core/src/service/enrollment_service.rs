//! Course-enrollment dashboard use-cases.
//!
//! # Responsibility
//! - Build the dashboard for a teacher (groups taught) or a student
//!   (available and enrolled groups for their placement).
//! - Append enrollments.
//!
//! # Invariants
//! - A student never sees a group outside their career/semester subjects.
//! - A student never sees a group they are already enrolled in as available.
//! - One enrollment per (student, group) pair; checked by scan before insert.

use crate::model::catalog::{Group, Subject};
use crate::model::enrollment::Enrollment;
use crate::model::next_record_id;
use crate::model::profile::Profile;
use crate::query::{
    available_groups, enrolled_group_ids, enrolled_groups, find_group, find_profile,
    find_subject, groups_taught_by, is_enrolled, subjects_for_placement,
};
use crate::store::{DocumentStore, Enrollments, Groups, Profiles, StoreError, Subjects};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EnrollmentResult<T> = Result<T, EnrollmentError>;

#[derive(Debug)]
pub enum EnrollmentError {
    StudentNotFound(String),
    /// Teachers cannot enroll in groups.
    NotAStudent(String),
    GroupNotFound(String),
    AlreadyEnrolled { student_id: String, group_id: String },
    Store(StoreError),
}

impl Display for EnrollmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::NotAStudent(id) => write!(f, "profile {id} is a teacher"),
            Self::GroupNotFound(id) => write!(f, "group not found: {id}"),
            Self::AlreadyEnrolled {
                student_id,
                group_id,
            } => write!(f, "student {student_id} already enrolled in group {group_id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EnrollmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for EnrollmentError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Display projection of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCard {
    pub group_id: String,
    pub subject_id: String,
    /// `None` when the subject is missing from the catalog.
    pub subject_name: Option<String>,
    /// `"<name> <surname>"`; `None` when the teacher profile is missing.
    pub teacher_name: Option<String>,
    pub schedule: u32,
}

/// Dashboard content for the signed-in profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dashboard {
    Teacher {
        groups: Vec<GroupCard>,
    },
    Student {
        subjects: Vec<Subject>,
        available: Vec<GroupCard>,
        enrolled: Vec<GroupCard>,
    },
}

/// Enrollment facade over catalog and enrollment documents.
pub struct EnrollmentService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> EnrollmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds the dashboard for `profile`.
    ///
    /// Students without a placement get an empty subject list and therefore
    /// no available groups; their enrolled groups are still listed.
    pub fn dashboard(&self, profile: &Profile) -> EnrollmentResult<Dashboard> {
        let groups = self.store.load::<Groups>()?;
        let subjects = self.store.load::<Subjects>()?;
        let profiles = self.store.load::<Profiles>()?;
        let cards = CardContext {
            subjects: &subjects,
            profiles: &profiles,
        };

        if profile.is_teacher {
            let taught = groups_taught_by(&groups, &profile.id);
            return Ok(Dashboard::Teacher {
                groups: cards.render(&taught),
            });
        }

        let enrollments = self.store.load::<Enrollments>()?;
        let placed = match profile.placement() {
            Some((career_id, semester)) => subjects_for_placement(&subjects, career_id, semester),
            None => Vec::new(),
        };
        let enrolled_ids = enrolled_group_ids(&enrollments, &profile.id);
        let available = available_groups(&groups, &placed, &enrolled_ids);
        let enrolled = enrolled_groups(&groups, &enrollments, &profile.id);

        Ok(Dashboard::Student {
            subjects: placed.into_iter().cloned().collect(),
            available: cards.render(&available),
            enrolled: cards.render(&enrolled),
        })
    }

    /// Enrolls `student_id` into `group_id`.
    pub fn enroll(&self, student_id: &str, group_id: &str) -> EnrollmentResult<Enrollment> {
        let profiles = self.store.load::<Profiles>()?;
        let student = find_profile(&profiles, student_id)
            .ok_or_else(|| EnrollmentError::StudentNotFound(student_id.to_string()))?;
        if student.is_teacher {
            return Err(EnrollmentError::NotAStudent(student_id.to_string()));
        }

        let groups = self.store.load::<Groups>()?;
        if find_group(&groups, group_id).is_none() {
            return Err(EnrollmentError::GroupNotFound(group_id.to_string()));
        }

        let mut enrollments = self.store.load::<Enrollments>()?;
        if is_enrolled(&enrollments, student_id, group_id) {
            warn!(
                "event=enroll module=enrollment status=rejected reason=already_enrolled student_id={} group_id={}",
                student_id, group_id
            );
            return Err(EnrollmentError::AlreadyEnrolled {
                student_id: student_id.to_string(),
                group_id: group_id.to_string(),
            });
        }

        let enrollment = Enrollment {
            id: next_record_id(enrollments.iter().map(|item| item.id.as_str())),
            student_id: student_id.to_string(),
            group_id: group_id.to_string(),
        };
        enrollments.push(enrollment.clone());
        self.store.save::<Enrollments>(&enrollments)?;

        info!(
            "event=enroll module=enrollment status=ok student_id={} group_id={}",
            student_id, group_id
        );
        Ok(enrollment)
    }
}

struct CardContext<'a> {
    subjects: &'a [Subject],
    profiles: &'a [Profile],
}

impl CardContext<'_> {
    fn render(&self, groups: &[&Group]) -> Vec<GroupCard> {
        groups.iter().map(|group| self.card(group)).collect()
    }

    fn card(&self, group: &Group) -> GroupCard {
        GroupCard {
            group_id: group.id.clone(),
            subject_id: group.subject_id.clone(),
            subject_name: find_subject(self.subjects, &group.subject_id)
                .map(|subject| subject.name.clone()),
            teacher_name: find_profile(self.profiles, &group.teacher_id).map(Profile::full_name),
            schedule: group.schedule,
        }
    }
}
