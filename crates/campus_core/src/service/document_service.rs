//! Uploaded-document metadata use-cases.

use crate::model::document::{DocumentRecord, DocumentUpload};
use crate::model::next_record_id;
use crate::query::{documents_for_student, find_profile};
use crate::store::{DocumentStore, Documents, Profiles, StoreError};
use chrono::{NaiveDate, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Debug)]
pub enum DocumentError {
    /// Picker returned no file (cancelled or empty selection).
    NothingSelected,
    StudentNotFound(String),
    Store(StoreError),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingSelected => write!(f, "no document was selected"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for DocumentError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub struct DocumentService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> DocumentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn upload_today(
        &self,
        student_id: &str,
        upload: &DocumentUpload,
    ) -> DocumentResult<DocumentRecord> {
        self.upload(student_id, upload, Utc::now().date_naive())
    }

    /// Appends exactly one metadata record for `upload`.
    ///
    /// The whole collection is rewritten, so records of other students are
    /// preserved.
    pub fn upload(
        &self,
        student_id: &str,
        upload: &DocumentUpload,
        today: NaiveDate,
    ) -> DocumentResult<DocumentRecord> {
        if !upload.is_selected() {
            return Err(DocumentError::NothingSelected);
        }

        let profiles = self.store.load::<Profiles>()?;
        if find_profile(&profiles, student_id).is_none() {
            return Err(DocumentError::StudentNotFound(student_id.to_string()));
        }

        let mut documents = self.store.load::<Documents>()?;
        let record = DocumentRecord {
            id: next_record_id(documents.iter().map(|item| item.id.as_str())),
            student_id: student_id.to_string(),
            date: today,
            file_url: upload.file_url.trim().to_string(),
            file_name: upload.file_name.trim().to_string(),
        };
        documents.push(record.clone());
        self.store.save::<Documents>(&documents)?;

        info!(
            "event=document_upload module=documents status=ok student_id={} document_id={}",
            student_id, record.id
        );
        Ok(record)
    }

    pub fn list(&self, student_id: &str) -> DocumentResult<Vec<DocumentRecord>> {
        let documents = self.store.load::<Documents>()?;
        Ok(documents_for_student(&documents, student_id)
            .into_iter()
            .cloned()
            .collect())
    }
}
