//! File-backed document store.
//!
//! # Responsibility
//! - Map each collection to one pretty-printed JSON file in a directory.
//! - Seed missing files from bundled defaults on first access.
//!
//! # Invariants
//! - Writes land in a sibling temp file that is renamed over the target, so a
//!   failed write leaves the previous document intact.
//! - No locking: concurrent writers of one document race and the last
//!   rename wins.

use super::{decode_document, encode_document, Collection, DocumentStore, StoreError, StoreResult};
use log::{debug, error, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Document store rooted at one app-private directory.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    root: PathBuf,
}

impl JsonDocumentStore {
    /// Opens a store in `root`, creating the directory when missing.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        debug!("event=store_open module=store status=ok");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document backing collection `C`.
    pub fn path_of<C: Collection>(&self) -> PathBuf {
        self.root.join(C::FILE_NAME)
    }

    fn seed<C: Collection>(&self, path: &Path) -> StoreResult<Vec<C::Record>> {
        let records = decode_document::<C>(C::DEFAULTS).map_err(|err| match err {
            StoreError::Parse { collection, source } => {
                StoreError::InvalidSeed { collection, source }
            }
            other => other,
        })?;
        self.write_document(path, &encode_document::<C>(&records)?)?;
        info!(
            "event=store_seed module=store status=ok collection={} records={}",
            C::NAME,
            records.len()
        );
        Ok(records)
    }

    fn write_document(&self, path: &Path, contents: &str) -> StoreResult<()> {
        let io_error = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut staged = NamedTempFile::new_in(&self.root).map_err(io_error)?;
        staged.write_all(contents.as_bytes()).map_err(io_error)?;
        staged.flush().map_err(io_error)?;
        staged.persist(path).map_err(|err| io_error(err.error))?;
        Ok(())
    }
}

impl DocumentStore for JsonDocumentStore {
    fn load<C: Collection>(&self) -> StoreResult<Vec<C::Record>> {
        let path = self.path_of::<C>();
        if !path.exists() {
            return self.seed::<C>(&path);
        }

        let text = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        match decode_document::<C>(&text) {
            Ok(records) => {
                debug!(
                    "event=store_load module=store status=ok collection={} records={}",
                    C::NAME,
                    records.len()
                );
                Ok(records)
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error collection={} error={}",
                    C::NAME,
                    err
                );
                Err(err)
            }
        }
    }

    fn save<C: Collection>(&self, records: &[C::Record]) -> StoreResult<()> {
        let started_at = Instant::now();
        let path = self.path_of::<C>();
        let contents = encode_document::<C>(records)?;

        match self.write_document(&path, &contents) {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok collection={} records={} duration_ms={}",
                    C::NAME,
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=store status=error collection={} duration_ms={} error={}",
                    C::NAME,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}
