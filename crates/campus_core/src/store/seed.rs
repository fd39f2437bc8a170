//! Bundled default documents written on first access.

pub(crate) const PROFILES: &str = include_str!("../../seed/profiles.json");
pub(crate) const CAREERS: &str = include_str!("../../seed/careers.json");
pub(crate) const SUBJECTS: &str = include_str!("../../seed/subjects.json");
pub(crate) const GROUPS: &str = include_str!("../../seed/groups.json");
pub(crate) const ENROLLMENTS: &str = include_str!("../../seed/enrollments.json");
pub(crate) const EMOTIONAL: &str = include_str!("../../seed/emotional.json");
pub(crate) const DOCUMENTS: &str = include_str!("../../seed/documents.json");
