//! Daily self-reported mood entries.
//!
//! # Invariants
//! - At most one entry per student per calendar day (checked by services).
//! - `status` keeps the persisted labels `Bien` / `Mal`.

use super::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Mood reported by a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "Bien")]
    Good,
    #[serde(rename = "Mal")]
    Bad,
}

impl Mood {
    /// Persisted label for this mood.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Bien",
            Self::Bad => "Mal",
        }
    }
}

/// Returned when a mood label is neither a persisted label nor an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMood(pub String);

impl Display for UnknownMood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown mood `{}`; expected Bien|Mal", self.0)
    }
}

impl Error for UnknownMood {}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bien" | "good" => Ok(Self::Good),
            "mal" | "bad" => Ok(Self::Bad),
            other => Err(UnknownMood(other.to_string())),
        }
    }
}

/// One mood entry for one student on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalStatus {
    pub id: RecordId,
    pub student_id: RecordId,
    /// Calendar day of the entry, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub status: Mood,
}

/// Per-mood counters over a student's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodSummary {
    pub good: usize,
    pub bad: usize,
}

impl MoodSummary {
    pub fn total(&self) -> usize {
        self.good + self.bad
    }

    /// Returns `(good%, bad%)` truncated toward zero; `(0, 0)` with no entries.
    pub fn percentages(&self) -> (u32, u32) {
        let total = self.total();
        if total == 0 {
            return (0, 0);
        }
        let percent = |count: usize| (count * 100 / total) as u32;
        (percent(self.good), percent(self.bad))
    }
}

impl<'a> FromIterator<&'a EmotionalStatus> for MoodSummary {
    fn from_iter<T: IntoIterator<Item = &'a EmotionalStatus>>(iter: T) -> Self {
        iter.into_iter()
            .fold(MoodSummary::default(), |mut summary, entry| {
                match entry.status {
                    Mood::Good => summary.good += 1,
                    Mood::Bad => summary.bad += 1,
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{EmotionalStatus, Mood, MoodSummary};
    use chrono::NaiveDate;

    #[test]
    fn mood_parses_labels_and_aliases() {
        assert_eq!("Bien".parse::<Mood>().unwrap(), Mood::Good);
        assert_eq!(" mal ".parse::<Mood>().unwrap(), Mood::Bad);
        assert_eq!("GOOD".parse::<Mood>().unwrap(), Mood::Good);
        assert!("meh".parse::<Mood>().is_err());
    }

    #[test]
    fn entry_serializes_with_persisted_labels() {
        let entry = EmotionalStatus {
            id: "1".to_string(),
            student_id: "3".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
            status: Mood::Bad,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "Mal");
        assert_eq!(json["date"], "2024-11-04");
    }

    #[test]
    fn percentages_truncate_and_default_to_zero() {
        assert_eq!(MoodSummary::default().percentages(), (0, 0));
        assert_eq!(MoodSummary { good: 2, bad: 1 }.percentages(), (66, 33));
        assert_eq!(MoodSummary { good: 0, bad: 4 }.percentages(), (0, 100));
    }
}
