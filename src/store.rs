//! JSON backing store for the roster
//!
//! Document layout:
//! ```json
//! {
//!   "S001": {
//!     "name": "Alice Johnson",
//!     "age": 20,
//!     "email": "alice@email.com",
//!     "grades": { "Math": 95.0 },
//!     "enrollment_date": "2024-07-22"
//!   }
//! }
//! ```
//!
//! Writes go to a sibling temp file which is then renamed over the store, so a
//! failed save never clobbers the previous document.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::StudentRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed store {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode roster: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Malformed entry for student {id}: {source}")]
    Entry {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Grade {grade} for {subject} of student {id} is outside [0, 100]")]
    Grade {
        id: String,
        subject: String,
        grade: f64,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persisted fields of one student; the id is the document key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredStudent {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub grades: BTreeMap<String, f64>,
    pub enrollment_date: String,
}

impl StoredStudent {
    pub fn from_record(record: &StudentRecord) -> Self {
        Self {
            name: record.name().to_string(),
            age: record.age(),
            email: record.email().to_string(),
            grades: record.grades().clone(),
            enrollment_date: record.enrollment_date().to_string(),
        }
    }

    pub fn into_record(self, id: &str) -> StoreResult<StudentRecord> {
        StudentRecord::restore(
            id,
            self.name,
            self.age,
            self.email,
            self.grades,
            self.enrollment_date,
        )
    }
}

/// Read the raw document. `Ok(None)` when the file does not exist.
///
/// Entries are left undecoded so the caller can restore them one at a time.
pub fn read_document(path: &Path) -> StoreResult<Option<Map<String, Value>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let doc = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(doc))
}

/// Decode a single document entry into a record
pub fn decode_entry(id: &str, value: Value) -> StoreResult<StudentRecord> {
    let stored: StoredStudent = serde_json::from_value(value).map_err(|source| StoreError::Entry {
        id: id.to_string(),
        source,
    })?;
    stored.into_record(id)
}

/// Serialize records as a pretty-printed document, keyed by id in iteration order
pub fn encode_document<'a>(
    records: impl IntoIterator<Item = &'a StudentRecord>,
) -> Result<String, serde_json::Error> {
    let mut doc = Map::new();
    for record in records {
        doc.insert(
            record.id().to_string(),
            serde_json::to_value(StoredStudent::from_record(record))?,
        );
    }
    serde_json::to_string_pretty(&Value::Object(doc))
}

/// Write the document to `path` via a temp file and rename
pub fn write_document<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a StudentRecord>,
) -> StoreResult<()> {
    let json = encode_document(records).map_err(StoreError::Encode)?;

    let tmp = temp_path(path);
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    log::debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".tmp");
    path.with_file_name(name)
}
