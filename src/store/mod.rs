//! In-memory store for the vital-signs dataset.
//!
//! The CSV file is read exactly once at startup. After that the table is
//! immutable and shared by reference, so concurrent readers need no
//! locking and there is no write path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod record;

pub use record::PatientRecord;

/// Failure to load the dataset at startup. Fatal: the process exits.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot open dataset {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed dataset row {row}")]
    Malformed {
        /// 1-based line number in the file, counting the header.
        row: u64,
        #[source]
        source: csv::Error,
    },
}

/// Index lookup outside the table.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("record index {index} out of bounds (len {len})")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

/// The loaded dataset: rows in file order plus a string-keyed id index.
#[derive(Debug)]
pub struct RecordStore {
    rows: Vec<PatientRecord>,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    /// Read a headered CSV file into memory.
    ///
    /// Ids are indexed as trimmed strings, so a numeric `7` in the file
    /// and a `"7"` lookup key hit the same record. When the file repeats
    /// an id the first occurrence wins.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut rows = Vec::new();
        for (i, result) in reader.deserialize().enumerate() {
            let record: PatientRecord = result.map_err(|source| LoadError::Malformed {
                row: i as u64 + 2,
                source,
            })?;
            rows.push(record);
        }

        let mut by_id = HashMap::with_capacity(rows.len());
        for (i, record) in rows.iter().enumerate() {
            by_id.entry(record.id_key().to_string()).or_insert(i);
        }

        tracing::info!(records = rows.len(), path = %path.display(), "dataset loaded");

        Ok(Self { rows, by_id })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The i-th row in file order.
    pub fn get(&self, index: usize) -> Result<&PatientRecord, IndexOutOfBounds> {
        self.rows.get(index).ok_or(IndexOutOfBounds {
            index,
            len: self.rows.len(),
        })
    }

    /// String-keyed id lookup. `None` is the not-found sentinel; callers
    /// render a user-visible message instead of failing the request.
    pub fn get_by_id(&self, id: &str) -> Option<&PatientRecord> {
        let index = *self.by_id.get(id.trim())?;
        Some(&self.rows[index])
    }

    /// Up to `count` rows starting at `offset`. Clamps at the end of the
    /// table; an out-of-range offset yields an empty slice, never an error.
    pub fn slice(&self, offset: usize, count: usize) -> &[PatientRecord] {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(count).min(self.rows.len());
        &self.rows[start..end]
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<PatientRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(rows.len());
        for (i, record) in rows.iter().enumerate() {
            by_id.entry(record.id_key().to_string()).or_insert(i);
        }
        Self { rows, by_id }
    }
}
