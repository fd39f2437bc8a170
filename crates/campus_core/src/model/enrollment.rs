//! Enrollment link between a student profile and a group.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// One student enrolled in one group.
///
/// Older documents carry enrollments without an id, so `id` defaults to an
/// empty string on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    #[serde(default)]
    pub id: RecordId,
    pub student_id: RecordId,
    pub group_id: RecordId,
}

impl Enrollment {
    pub fn links(&self, student_id: &str, group_id: &str) -> bool {
        self.student_id == student_id && self.group_id == group_id
    }
}
