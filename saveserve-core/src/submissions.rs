//! Local append-only log of contact form submissions.
//!
//! Kept as a redundant copy next to the email relay. The log reads its
//! backend lazily (a missing store reads as empty) and rewrites the whole
//! list on append. Backends are injected: [`MemoryStore`] for tests,
//! [`JsonFileStore`] on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::form::ContactForm;

/// Storage key, also used as the default file stem.
pub const STORAGE_KEY: &str = "saveServe_submissions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub form: ContactForm,
}

impl SubmissionRecord {
    pub fn new(form: ContactForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            form,
        }
    }
}

/// Backend holding the full list of records.
pub trait SubmissionStore {
    /// All stored records; an uninitialised store reads as empty.
    fn load(&self) -> Result<Vec<SubmissionRecord>>;

    /// Replace the stored list.
    fn store(&mut self, records: &[SubmissionRecord]) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SubmissionRecord>,
}

impl SubmissionStore for MemoryStore {
    fn load(&self) -> Result<Vec<SubmissionRecord>> {
        Ok(self.records.clone())
    }

    fn store(&mut self, records: &[SubmissionRecord]) -> Result<()> {
        self.records = records.to_vec();
        Ok(())
    }
}

/// JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.saveserve/saveServe_submissions.json`
    pub fn default_path() -> Option<PathBuf> {
        crate::config::config_dir().map(|dir| dir.join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubmissionStore for JsonFileStore {
    fn load(&self) -> Result<Vec<SubmissionRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "submission store not initialised yet");
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .map_err(|err| CoreError::json(self.path.display().to_string(), err))
    }

    fn store(&mut self, records: &[SubmissionRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(records)
            .map_err(|err| CoreError::json("submission records", err))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Append-only view over a [`SubmissionStore`].
#[derive(Debug)]
pub struct SubmissionLog<S> {
    store: S,
}

impl<S: SubmissionStore> SubmissionLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn append(&mut self, form: ContactForm) -> Result<SubmissionRecord> {
        let mut records = self.store.load()?;
        let record = SubmissionRecord::new(form);
        records.push(record.clone());
        self.store.store(&records)?;
        info!(id = %record.id, role = %record.form.role, total = records.len(), "submission logged");
        Ok(record)
    }

    pub fn entries(&self) -> Result<Vec<SubmissionRecord>> {
        self.store.load()
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.store.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
