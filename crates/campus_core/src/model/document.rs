//! Metadata of files a student has uploaded.

use super::RecordId;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Persisted metadata for one uploaded file.
///
/// Only the location reference is stored; file bytes never enter the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: RecordId,
    pub student_id: RecordId,
    /// Upload day, serialized as `YYYY-MM-DD`.
    ///
    /// Older documents stored a full RFC 3339 timestamp; those load as the
    /// timestamp's calendar day.
    #[serde(deserialize_with = "day_or_timestamp")]
    pub date: NaiveDate,
    /// Location reference returned by the platform picker.
    pub file_url: String,
    pub file_name: String,
}

fn day_or_timestamp<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let value = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| serde::de::Error::custom(format!("invalid document date `{value}`")))
}

/// File selection handed over by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub file_url: String,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, file_url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            file_url: file_url.into(),
        }
    }

    /// Returns `false` for a cancelled pick (no name or no location).
    pub fn is_selected(&self) -> bool {
        !self.file_name.trim().is_empty() && !self.file_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentRecord;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record_with_date(date: &str) -> serde_json::Result<DocumentRecord> {
        serde_json::from_value(json!({
            "id": "1",
            "student_id": "3",
            "date": date,
            "file_url": "file:///docs/acta.pdf",
            "file_name": "acta.pdf"
        }))
    }

    #[test]
    fn date_accepts_plain_day_and_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 8).unwrap();
        assert_eq!(record_with_date("2024-11-08").unwrap().date, expected);
        assert_eq!(
            record_with_date("2024-11-08T16:04:05.123Z").unwrap().date,
            expected
        );
    }

    #[test]
    fn date_serializes_as_plain_day() {
        let record = record_with_date("2024-11-08T16:04:05.123Z").unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["date"], "2024-11-08");
    }

    #[test]
    fn date_rejects_garbage() {
        assert!(record_with_date("yesterday").is_err());
    }
}
