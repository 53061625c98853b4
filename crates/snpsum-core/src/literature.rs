//! Per-SNP literature text attachment.
//!
//! Each joined variant may have a text file at `<text_dir>/<id>/data.csv`.
//! Files are decoded as UTF-8 with a Latin-1 fallback; missing files get a
//! fixed placeholder so downstream steps see one entry per row either way.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, SnpsumError};
use crate::join::JoinedVariant;

/// Placeholder content for SNPs with no text file on disk.
pub const MISSING_TEXT_SENTINEL: &str = "No text file found";

/// File name looked up inside each per-SNP directory.
pub const TEXT_FILE_NAME: &str = "data.csv";

/// A SNP identifier with its attached literature text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSnp {
    /// Variant identifier
    pub id: String,
    /// File content, or [`MISSING_TEXT_SENTINEL`]
    pub content: String,
}

impl AnnotatedSnp {
    /// Whether this row carries real text rather than the placeholder.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.content != MISSING_TEXT_SENTINEL
    }
}

/// One literature table row: a PubMed abstract and its source link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractEntry {
    /// Abstract text
    pub text: String,
    /// PubMed source URL
    pub url: String,
}

/// Column holding the abstract text in a literature table.
const ABSTRACT_COLUMN: &str = "Abstract";
/// Column holding the source link in a literature table.
const URL_COLUMN: &str = "PubMedURL";

/// Path of the text file for one SNP id.
fn text_file_path(text_dir: &Path, id: &str) -> PathBuf {
    text_dir.join(id).join(TEXT_FILE_NAME)
}

/// Read one SNP text file, decoding UTF-8 with a Latin-1 fallback.
///
/// Returns `None` when the file does not exist.
///
/// # Errors
///
/// Returns an error for any read failure other than a missing file.
pub fn read_text_file(text_dir: &Path, id: &str) -> Result<Option<String>> {
    let path = text_file_path(text_dir, id);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SnpsumError::Io(e)),
    };
    Ok(Some(decode_text(&bytes)))
}

/// Decode bytes as UTF-8, falling back to Latin-1 when invalid.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback cannot fail.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => encoding_rs::mem::decode_latin1(bytes).into_owned(),
    }
}

/// Attach literature text to every joined variant, in join order.
///
/// Prints one `Processing SNP: <id>` line per row.
///
/// # Errors
///
/// Returns an error when a text file exists but cannot be read.
pub fn attach_texts(joined: &[JoinedVariant], text_dir: &Path) -> Result<Vec<AnnotatedSnp>> {
    let mut annotated = Vec::new();
    for row in joined {
        println!("Processing SNP: {}", row.id);

        let content = match read_text_file(text_dir, &row.id)? {
            Some(text) => text,
            None => {
                warn!(id = %row.id, "no text file found");
                MISSING_TEXT_SENTINEL.to_string()
            }
        };

        annotated.push(AnnotatedSnp {
            id: row.id.clone(),
            content,
        });
    }
    Ok(annotated)
}

/// Parse a per-SNP `data.csv` as a table of PubMed abstracts.
///
/// Rows with an empty abstract are dropped.
///
/// # Errors
///
/// Returns an error when the table is malformed or lacks the `Abstract`
/// or `PubMedURL` column.
pub fn parse_abstracts(content: &str) -> Result<Vec<AbstractEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| SnpsumError::Literature(format!("invalid CSV header: {e}")))?
        .clone();

    let abstract_index = headers
        .iter()
        .position(|name| name == ABSTRACT_COLUMN)
        .ok_or_else(|| {
            SnpsumError::Literature(format!("missing required column: {ABSTRACT_COLUMN}"))
        })?;
    let url_index = headers
        .iter()
        .position(|name| name == URL_COLUMN)
        .ok_or_else(|| {
            SnpsumError::Literature(format!("missing required column: {URL_COLUMN}"))
        })?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result
            .map_err(|e| SnpsumError::Literature(format!("invalid CSV record: {e}")))?;

        let text = record.get(abstract_index).unwrap_or_default().to_string();
        if text.is_empty() {
            continue;
        }
        let url = record.get(url_index).unwrap_or_default().to_string();

        entries.push(AbstractEntry { text, url });
    }

    Ok(entries)
}
