//! Domain records persisted in the campus JSON documents.
//!
//! # Responsibility
//! - Define the canonical record shapes shared by store, queries and services.
//! - Keep persisted JSON field names stable through serde renames.
//!
//! # Invariants
//! - Records are plain data; mutation happens only by full-document rewrite.
//! - Record ids are decimal strings allocated by `next_record_id`.

use std::collections::HashSet;

pub mod catalog;
pub mod document;
pub mod enrollment;
pub mod profile;
pub mod wellbeing;

/// Identifier used by every persisted record (`"1"`, `"2"`, ...).
pub type RecordId = String;

/// Allocates the id for a record appended to a collection.
///
/// Starts at `len + 1` and moves upward past any id already in use, so
/// an append never reuses an existing id.
pub fn next_record_id<I, S>(existing: I) -> RecordId
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken = existing
        .into_iter()
        .map(|id| id.as_ref().to_string())
        .collect::<Vec<_>>();
    let lookup = taken.iter().map(String::as_str).collect::<HashSet<_>>();

    let mut candidate = taken.len() as u64 + 1;
    while lookup.contains(candidate.to_string().as_str()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::next_record_id;

    #[test]
    fn next_id_is_length_plus_one() {
        assert_eq!(next_record_id(["1", "2", "3"]), "4");
        assert_eq!(next_record_id(Vec::<String>::new()), "1");
    }

    #[test]
    fn next_id_skips_ids_already_in_use() {
        // "2" was removed out of band, so len + 1 collides with "3".
        assert_eq!(next_record_id(["1", "3"]), "4");
        assert_eq!(next_record_id(["3", "4", "1"]), "5");
    }
}
