//! Academic catalog records: careers, subjects and scheduled groups.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// A career (degree track) a student is placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub id: RecordId,
    pub name: String,
}

/// A subject taught in one career at one semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: RecordId,
    pub name: String,
    pub career_id: RecordId,
    pub semester: u32,
}

impl Subject {
    /// Returns whether this subject belongs to the given career/semester.
    pub fn matches_placement(&self, career_id: &str, semester: u32) -> bool {
        self.career_id == career_id && self.semester == semester
    }
}

/// A scheduled offering of a subject taught by one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: RecordId,
    pub subject_id: RecordId,
    pub teacher_id: RecordId,
    /// Hour slot of the class (24h clock).
    pub schedule: u32,
}
