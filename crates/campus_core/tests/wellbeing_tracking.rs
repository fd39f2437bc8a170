use campus_core::store::EmotionalEntries;
use campus_core::{
    DocumentStore, JsonDocumentStore, Mood, MoodSummary, WellbeingError, WellbeingService,
};
use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

#[test]
fn one_mood_entry_per_student_per_day() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let service = WellbeingService::new(&store);

    let entry = service.record_mood("4", Mood::Good, day(10)).unwrap();
    assert_eq!(entry.student_id, "4");
    assert_eq!(entry.date, day(10));

    let err = service.record_mood("4", Mood::Bad, day(10)).unwrap_err();
    assert!(matches!(
        err,
        WellbeingError::AlreadyRecordedToday { ref student_id, date }
            if student_id == "4" && date == day(10)
    ));

    // A different student, or the next day, is accepted.
    service.record_mood("3", Mood::Bad, day(10)).unwrap();
    service.record_mood("4", Mood::Bad, day(11)).unwrap();

    assert_eq!(service.history("4").unwrap().len(), 2);
}

#[test]
fn seeded_day_blocks_a_second_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let service = WellbeingService::new(&store);
    let before = store.load::<EmotionalEntries>().unwrap().len();

    assert!(service.record_mood("3", Mood::Good, day(4)).is_err());
    assert_eq!(store.load::<EmotionalEntries>().unwrap().len(), before);
}

#[test]
fn summary_counts_good_and_bad_entries() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let service = WellbeingService::new(&store);

    service.record_mood("3", Mood::Good, day(6)).unwrap();

    let summary = service.summary("3").unwrap();
    assert_eq!(summary, MoodSummary { good: 2, bad: 1 });
    assert_eq!(summary.total(), 3);
    assert_eq!(service.summary("4").unwrap(), MoodSummary::default());
}

#[test]
fn unknown_student_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonDocumentStore::open(dir.path()).unwrap();
    let service = WellbeingService::new(&store);

    let err = service.record_mood_today("404", Mood::Good).unwrap_err();
    assert!(matches!(err, WellbeingError::StudentNotFound(_)));
}
