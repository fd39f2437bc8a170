//! JSON document store for campus records.
//!
//! # Responsibility
//! - Define the named collections and their on-disk envelope.
//! - Define the load/save contract used by every use-case service.
//!
//! # Invariants
//! - Every document is `{ "<collection>": [ ... ] }`.
//! - `load` of a missing document seeds it from bundled defaults first.
//! - `save` rewrites the whole document; there are no partial updates.

use crate::model::catalog::{Career, Group, Subject};
use crate::model::document::DocumentRecord;
use crate::model::enrollment::Enrollment;
use crate::model::profile::Profile;
use crate::model::wellbeing::EmotionalStatus;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;
mod seed;

pub use json_store::JsonDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for document load/save operations.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        collection: &'static str,
        source: serde_json::Error,
    },
    MissingCollection(&'static str),
    InvalidSeed {
        collection: &'static str,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::Parse { collection, source } => {
                write!(f, "invalid `{collection}` document: {source}")
            }
            Self::MissingCollection(collection) => {
                write!(f, "document has no `{collection}` collection")
            }
            Self::InvalidSeed { collection, source } => {
                write!(f, "bundled `{collection}` defaults are invalid: {source}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidSeed { source, .. } => Some(source),
            Self::MissingCollection(_) => None,
        }
    }
}

/// A named collection persisted as one JSON document.
pub trait Collection {
    type Record: Serialize + DeserializeOwned;

    /// Envelope key and log name.
    const NAME: &'static str;
    /// File name inside the store directory.
    const FILE_NAME: &'static str;
    /// Bundled default document used on first access.
    const DEFAULTS: &'static str;
}

macro_rules! collection {
    ($marker:ident, $record:ty, $name:literal, $defaults:path) => {
        #[doc = concat!("The `", $name, "` collection.")]
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl Collection for $marker {
            type Record = $record;
            const NAME: &'static str = $name;
            const FILE_NAME: &'static str = concat!($name, ".json");
            const DEFAULTS: &'static str = $defaults;
        }
    };
}

collection!(Profiles, Profile, "profiles", seed::PROFILES);
collection!(Careers, Career, "careers", seed::CAREERS);
collection!(Subjects, Subject, "subjects", seed::SUBJECTS);
collection!(Groups, Group, "groups", seed::GROUPS);
collection!(Enrollments, Enrollment, "enrollments", seed::ENROLLMENTS);
collection!(EmotionalEntries, EmotionalStatus, "emotional", seed::EMOTIONAL);
collection!(Documents, DocumentRecord, "documents", seed::DOCUMENTS);

/// Load/save contract over named collections.
pub trait DocumentStore {
    /// Returns the full collection, seeding the document if it is absent.
    fn load<C: Collection>(&self) -> StoreResult<Vec<C::Record>>;
    /// Overwrites the document with `records`.
    fn save<C: Collection>(&self, records: &[C::Record]) -> StoreResult<()>;
}

impl<T: DocumentStore> DocumentStore for &T {
    fn load<C: Collection>(&self) -> StoreResult<Vec<C::Record>> {
        (**self).load::<C>()
    }

    fn save<C: Collection>(&self, records: &[C::Record]) -> StoreResult<()> {
        (**self).save::<C>(records)
    }
}

/// Materializes every collection (first-launch file check).
pub fn ensure_all<S: DocumentStore>(store: &S) -> StoreResult<()> {
    store.load::<Profiles>()?;
    store.load::<Careers>()?;
    store.load::<Subjects>()?;
    store.load::<Groups>()?;
    store.load::<Enrollments>()?;
    store.load::<EmotionalEntries>()?;
    store.load::<Documents>()?;
    Ok(())
}

pub(crate) fn decode_document<C: Collection>(text: &str) -> StoreResult<Vec<C::Record>> {
    let parse_error = |source| StoreError::Parse {
        collection: C::NAME,
        source,
    };

    let mut root: Value = serde_json::from_str(text).map_err(parse_error)?;
    let items = root
        .get_mut(C::NAME)
        .map(Value::take)
        .ok_or(StoreError::MissingCollection(C::NAME))?;
    serde_json::from_value(items).map_err(parse_error)
}

pub(crate) fn encode_document<C: Collection>(records: &[C::Record]) -> StoreResult<String> {
    let encode_error = |source| StoreError::Parse {
        collection: C::NAME,
        source,
    };

    let mut root = Map::new();
    root.insert(
        C::NAME.to_string(),
        serde_json::to_value(records).map_err(encode_error)?,
    );
    serde_json::to_string_pretty(&Value::Object(root)).map_err(encode_error)
}
