//! Linear filters over loaded collections.
//!
//! Every function is a pure scan that keeps source order. Services load the
//! documents and call these; nothing here touches storage.

use crate::model::catalog::{Group, Subject};
use crate::model::document::DocumentRecord;
use crate::model::enrollment::Enrollment;
use crate::model::profile::Profile;
use crate::model::wellbeing::EmotionalStatus;
use chrono::NaiveDate;

/// Profile whose email and enrollment number both match.
pub fn find_by_credentials<'a>(
    profiles: &'a [Profile],
    email: &str,
    enrollment_number: &str,
) -> Option<&'a Profile> {
    profiles
        .iter()
        .find(|profile| profile.has_credentials(email, enrollment_number))
}

/// Profile already holding the email or the enrollment number.
pub fn find_registration_conflict<'a>(
    profiles: &'a [Profile],
    email: &str,
    enrollment_number: &str,
) -> Option<&'a Profile> {
    profiles
        .iter()
        .find(|profile| profile.email == email || profile.enrollment_number == enrollment_number)
}

pub fn find_profile<'a>(profiles: &'a [Profile], id: &str) -> Option<&'a Profile> {
    profiles.iter().find(|profile| profile.id == id)
}

pub fn find_subject<'a>(subjects: &'a [Subject], id: &str) -> Option<&'a Subject> {
    subjects.iter().find(|subject| subject.id == id)
}

pub fn find_group<'a>(groups: &'a [Group], id: &str) -> Option<&'a Group> {
    groups.iter().find(|group| group.id == id)
}

/// Subjects offered to a student placed in `career_id` at `semester`.
pub fn subjects_for_placement<'a>(
    subjects: &'a [Subject],
    career_id: &str,
    semester: u32,
) -> Vec<&'a Subject> {
    subjects
        .iter()
        .filter(|subject| subject.matches_placement(career_id, semester))
        .collect()
}

pub fn groups_taught_by<'a>(groups: &'a [Group], teacher_id: &str) -> Vec<&'a Group> {
    groups
        .iter()
        .filter(|group| group.teacher_id == teacher_id)
        .collect()
}

pub fn enrolled_group_ids<'a>(enrollments: &'a [Enrollment], student_id: &str) -> Vec<&'a str> {
    enrollments
        .iter()
        .filter(|enrollment| enrollment.student_id == student_id)
        .map(|enrollment| enrollment.group_id.as_str())
        .collect()
}

/// Groups of the given subjects that the student has not joined yet.
pub fn available_groups<'a>(
    groups: &'a [Group],
    subjects: &[&Subject],
    enrolled_ids: &[&str],
) -> Vec<&'a Group> {
    groups
        .iter()
        .filter(|group| subjects.iter().any(|subject| subject.id == group.subject_id))
        .filter(|group| !enrolled_ids.contains(&group.id.as_str()))
        .collect()
}

/// Groups the student is enrolled in, in group-document order.
pub fn enrolled_groups<'a>(
    groups: &'a [Group],
    enrollments: &[Enrollment],
    student_id: &str,
) -> Vec<&'a Group> {
    let enrolled_ids = enrolled_group_ids(enrollments, student_id);
    groups
        .iter()
        .filter(|group| enrolled_ids.contains(&group.id.as_str()))
        .collect()
}

pub fn is_enrolled(enrollments: &[Enrollment], student_id: &str, group_id: &str) -> bool {
    enrollments
        .iter()
        .any(|enrollment| enrollment.links(student_id, group_id))
}

pub fn entries_for_student<'a>(
    entries: &'a [EmotionalStatus],
    student_id: &str,
) -> Vec<&'a EmotionalStatus> {
    entries
        .iter()
        .filter(|entry| entry.student_id == student_id)
        .collect()
}

pub fn has_entry_on(entries: &[EmotionalStatus], student_id: &str, date: NaiveDate) -> bool {
    entries
        .iter()
        .any(|entry| entry.student_id == student_id && entry.date == date)
}

pub fn documents_for_student<'a>(
    documents: &'a [DocumentRecord],
    student_id: &str,
) -> Vec<&'a DocumentRecord> {
    documents
        .iter()
        .filter(|document| document.student_id == student_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::wellbeing::Mood;

    fn profile(id: &str, email: &str, matr: &str) -> Profile {
        Profile {
            id: id.to_string(),
            name: "N".to_string(),
            surname: "S".to_string(),
            group_ids: Vec::new(),
            enrollment_number: matr.to_string(),
            tutor_name: None,
            contact: String::new(),
            curp: String::new(),
            rfc: None,
            document_ids: Vec::new(),
            email: email.to_string(),
            career_id: Some("1".to_string()),
            semester: Some(2),
            is_teacher: false,
        }
    }

    fn subject(id: &str, career_id: &str, semester: u32) -> Subject {
        Subject {
            id: id.to_string(),
            name: format!("subject {id}"),
            career_id: career_id.to_string(),
            semester,
        }
    }

    fn group(id: &str, subject_id: &str, teacher_id: &str) -> Group {
        Group {
            id: id.to_string(),
            subject_id: subject_id.to_string(),
            teacher_id: teacher_id.to_string(),
            schedule: 8,
        }
    }

    fn enrollment(student_id: &str, group_id: &str) -> Enrollment {
        Enrollment {
            id: String::new(),
            student_id: student_id.to_string(),
            group_id: group_id.to_string(),
        }
    }

    #[test]
    fn credentials_require_both_fields() {
        let profiles = vec![profile("1", "a@x.mx", "100"), profile("2", "b@x.mx", "200")];

        assert_eq!(
            find_by_credentials(&profiles, "b@x.mx", "200").map(|p| p.id.as_str()),
            Some("2")
        );
        assert!(find_by_credentials(&profiles, "b@x.mx", "100").is_none());
        assert!(find_by_credentials(&profiles, "c@x.mx", "200").is_none());
    }

    #[test]
    fn registration_conflict_matches_either_field() {
        let profiles = vec![profile("1", "a@x.mx", "100")];

        assert!(find_registration_conflict(&profiles, "a@x.mx", "999").is_some());
        assert!(find_registration_conflict(&profiles, "z@x.mx", "100").is_some());
        assert!(find_registration_conflict(&profiles, "z@x.mx", "999").is_none());
    }

    #[test]
    fn available_groups_filter_by_placement_and_enrollment() {
        let subjects = vec![subject("1", "1", 2), subject("2", "1", 4), subject("3", "2", 2)];
        let groups = vec![
            group("1", "1", "t1"),
            group("2", "1", "t2"),
            group("3", "2", "t1"),
            group("4", "3", "t1"),
        ];
        let enrollments = vec![enrollment("s", "1"), enrollment("other", "2")];

        let placed = subjects_for_placement(&subjects, "1", 2);
        assert_eq!(placed.len(), 1);

        let enrolled = enrolled_group_ids(&enrollments, "s");
        let available = available_groups(&groups, &placed, &enrolled);
        let ids = available.iter().map(|g| g.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["2"]);

        let mine = enrolled_groups(&groups, &enrollments, "s");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "1");
    }

    #[test]
    fn teacher_groups_keep_source_order() {
        let groups = vec![group("3", "1", "t1"), group("1", "1", "t2"), group("2", "1", "t1")];
        let ids = groups_taught_by(&groups, "t1")
            .iter()
            .map(|g| g.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["3", "2"]);
    }

    #[test]
    fn mood_lookup_is_per_student_and_day() {
        let day = NaiveDate::from_ymd_opt(2024, 11, 4).unwrap();
        let entries = vec![EmotionalStatus {
            id: "1".to_string(),
            student_id: "s".to_string(),
            date: day,
            status: Mood::Good,
        }];

        assert!(has_entry_on(&entries, "s", day));
        assert!(!has_entry_on(&entries, "other", day));
        assert!(!has_entry_on(&entries, "s", day.succ_opt().unwrap()));
        assert_eq!(entries_for_student(&entries, "s").len(), 1);
    }
}
