//! Roster manager
//!
//! Owns the student records in insertion order, keyed by id, and the
//! load/save round-trip with the backing store. Mutations stay in memory
//! until [`Roster::save`] is called.

use std::path::{Path, PathBuf};

use crate::record::{LetterGrade, StudentRecord};
use crate::settings::Settings;
use crate::store::{self, StoreResult};

/// In-memory roster backed by a JSON file
#[derive(Debug, Clone)]
pub struct Roster {
    /// Records in insertion order, at most one per id
    records: Vec<StudentRecord>,
    path: PathBuf,
    top_count: usize,
}

impl Roster {
    /// Open the roster described by `settings`, loading any existing store.
    ///
    /// Load failures are logged; the roster keeps whatever was restored.
    pub fn open(settings: &Settings) -> Self {
        let mut roster = Self {
            records: Vec::new(),
            path: settings.store_path.clone(),
            top_count: settings.top_count,
        };
        // Already logged by load()
        let _ = roster.load();
        roster
    }

    /// Open with default settings and the given store path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::open(&Settings::default().with_store_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Insert a record, replacing any record with the same id in place
    pub fn add(&mut self, record: StudentRecord) {
        log::info!("Student {} added successfully", record.name());
        match self.position(record.id()) {
            Some(i) => self.records[i] = record,
            None => self.records.push(record),
        }
    }

    /// Remove and return the record with `id`, if present
    pub fn remove(&mut self, id: &str) -> Option<StudentRecord> {
        match self.position(id) {
            Some(i) => {
                let removed = self.records.remove(i);
                log::info!("Student {} removed successfully", removed.name());
                Some(removed)
            }
            None => {
                log::warn!("Student {} not found", id);
                None
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Mutable lookup, for recording grades on an existing student
    pub fn find_mut(&mut self, id: &str) -> Option<&mut StudentRecord> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Up to `n` records by descending average.
    ///
    /// The sort is stable, so equal averages keep insertion order.
    pub fn top_n(&self, n: usize) -> Vec<&StudentRecord> {
        let mut ranked: Vec<&StudentRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.average().total_cmp(&a.average()));
        ranked.truncate(n);
        ranked
    }

    /// [`Roster::top_n`] with the configured ranking size
    pub fn top(&self) -> Vec<&StudentRecord> {
        self.top_n(self.top_count)
    }

    /// Records whose letter grade is `letter`, in insertion order
    pub fn by_letter_grade(&self, letter: LetterGrade) -> Vec<&StudentRecord> {
        self.records
            .iter()
            .filter(|r| r.letter_grade() == letter)
            .collect()
    }

    /// Write every record to the backing store.
    ///
    /// On failure the previous store file and the in-memory roster are untouched.
    pub fn save(&self) -> StoreResult<()> {
        match store::write_document(&self.path, &self.records) {
            Ok(()) => {
                log::info!(
                    "Data saved successfully ({} students to {})",
                    self.records.len(),
                    self.path.display()
                );
                Ok(())
            }
            Err(e) => {
                log::error!("Error saving data: {}", e);
                Err(e)
            }
        }
    }

    /// Merge the backing store into the roster, returning how many records were restored.
    ///
    /// A missing store restores nothing. Entries are restored in document
    /// order; a malformed entry stops the load and keeps earlier entries.
    pub fn load(&mut self) -> StoreResult<usize> {
        let result = self.load_entries();
        match &result {
            Ok(0) => log::debug!("No students loaded from {}", self.path.display()),
            Ok(n) => log::info!("Data loaded successfully ({} students)", n),
            Err(e) => log::error!("Error loading data: {}", e),
        }
        result
    }

    fn load_entries(&mut self) -> StoreResult<usize> {
        let Some(doc) = store::read_document(&self.path)? else {
            return Ok(0);
        };
        let mut restored = 0;
        for (id, value) in doc {
            let record = store::decode_entry(&id, value)?;
            match self.position(&id) {
                Some(i) => self.records[i] = record,
                None => self.records.push(record),
            }
            restored += 1;
        }
        Ok(restored)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a StudentRecord;
    type IntoIter = std::slice::Iter<'a, StudentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
