//! Reference SNP list loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, SnpsumError};

/// Name of the identifier column the reference list must carry.
pub const ID_COLUMN: &str = "ID";

/// One row of the reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpEntry {
    /// Variant identifier (e.g., "rs12345")
    pub id: String,
    /// Remaining columns as (header, value) pairs in file order
    pub extra: Vec<(String, String)>,
}

/// The reference list of SNPs of interest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnpList {
    entries: Vec<SnpEntry>,
}

impl SnpList {
    /// Load the list from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be opened, the CSV is
    /// malformed, or the header lacks an `ID` column.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SnpsumError::Reference(format!("failed to open {}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }

    /// Load the list from any CSV reader.
    ///
    /// # Errors
    ///
    /// Returns an error when the CSV is malformed or the header lacks an
    /// `ID` column.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| SnpsumError::Reference(format!("invalid CSV header: {e}")))?
            .clone();

        let id_index = headers
            .iter()
            .position(|name| name == ID_COLUMN)
            .ok_or_else(|| {
                SnpsumError::Reference(format!("missing required column: {ID_COLUMN}"))
            })?;

        let mut entries = Vec::new();
        for result in csv_reader.records() {
            let record = result
                .map_err(|e| SnpsumError::Reference(format!("invalid CSV record: {e}")))?;

            let id = record.get(id_index).unwrap_or_default().to_string();
            // Blank ids can never join.
            if id.is_empty() {
                continue;
            }

            let extra = headers
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|(i, _)| *i != id_index)
                .map(|(_, (name, value))| (name.to_string(), value.to_string()))
                .collect();

            entries.push(SnpEntry { id, extra });
        }

        Ok(Self { entries })
    }

    /// Rows in file order.
    #[must_use]
    pub fn entries(&self) -> &[SnpEntry] {
        &self.entries
    }

    /// Identifiers in file order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
