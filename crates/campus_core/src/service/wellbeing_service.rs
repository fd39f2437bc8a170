//! Daily mood tracking use-cases.
//!
//! # Invariants
//! - One entry per student per calendar day; a second one is rejected.
//! - "Today" is the UTC calendar date unless the caller supplies a date.

use crate::model::next_record_id;
use crate::model::wellbeing::{EmotionalStatus, Mood, MoodSummary};
use crate::query::{entries_for_student, find_profile, has_entry_on};
use crate::store::{DocumentStore, EmotionalEntries, Profiles, StoreError};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type WellbeingResult<T> = Result<T, WellbeingError>;

#[derive(Debug)]
pub enum WellbeingError {
    StudentNotFound(String),
    AlreadyRecordedToday { student_id: String, date: NaiveDate },
    Store(StoreError),
}

impl Display for WellbeingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::AlreadyRecordedToday { student_id, date } => {
                write!(f, "mood already recorded for student {student_id} on {date}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WellbeingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for WellbeingError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Wellbeing facade over the emotional-status document.
pub struct WellbeingService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> WellbeingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records today's mood using the current UTC date.
    pub fn record_mood_today(&self, student_id: &str, mood: Mood) -> WellbeingResult<EmotionalStatus> {
        self.record_mood(student_id, mood, Utc::now().date_naive())
    }

    /// Records `mood` for `student_id` on `today`.
    pub fn record_mood(
        &self,
        student_id: &str,
        mood: Mood,
        today: NaiveDate,
    ) -> WellbeingResult<EmotionalStatus> {
        let profiles = self.store.load::<Profiles>()?;
        if find_profile(&profiles, student_id).is_none() {
            return Err(WellbeingError::StudentNotFound(student_id.to_string()));
        }

        let mut entries = self.store.load::<EmotionalEntries>()?;
        if has_entry_on(&entries, student_id, today) {
            warn!(
                "event=mood_record module=wellbeing status=rejected reason=already_recorded student_id={}",
                student_id
            );
            return Err(WellbeingError::AlreadyRecordedToday {
                student_id: student_id.to_string(),
                date: today,
            });
        }

        let entry = EmotionalStatus {
            id: next_record_id(entries.iter().map(|item| item.id.as_str())),
            student_id: student_id.to_string(),
            date: today,
            status: mood,
        };
        entries.push(entry.clone());
        self.store.save::<EmotionalEntries>(&entries)?;

        info!(
            "event=mood_record module=wellbeing status=ok student_id={} mood={}",
            student_id,
            mood.label()
        );
        Ok(entry)
    }

    /// All entries of `student_id` in document order.
    pub fn history(&self, student_id: &str) -> WellbeingResult<Vec<EmotionalStatus>> {
        let entries = self.store.load::<EmotionalEntries>()?;
        Ok(entries_for_student(&entries, student_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Good/bad counters over the student's history.
    pub fn summary(&self, student_id: &str) -> WellbeingResult<MoodSummary> {
        let entries = self.store.load::<EmotionalEntries>()?;
        Ok(entries_for_student(&entries, student_id)
            .into_iter()
            .collect())
    }
}
