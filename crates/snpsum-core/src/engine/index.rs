//! In-memory vector index over document chunks.

use crate::error::{Result, SnpsumError};

use super::Document;

/// Target chunk size in words.
pub const CHUNK_WORDS: usize = 256;

/// Overlap between consecutive chunks in words.
pub const CHUNK_OVERLAP_WORDS: usize = 32;

/// Number of chunks retrieved per query.
pub const DEFAULT_TOP_K: usize = 4;

/// One indexable chunk of a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Identifier of the document the chunk came from
    pub doc_id: String,
    /// Chunk text
    pub text: String,
}

/// Split a document into word windows of [`CHUNK_WORDS`] words with
/// [`CHUNK_OVERLAP_WORDS`] words of overlap.
///
/// Documents at or under the window size yield exactly one chunk with the
/// text unchanged. Empty documents yield none.
#[must_use]
pub fn chunk_document(doc: &Document) -> Vec<Chunk> {
    let words: Vec<&str> = doc.text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    if words.len() <= CHUNK_WORDS {
        return vec![Chunk {
            doc_id: doc.id.clone(),
            text: doc.text.trim().to_string(),
        }];
    }

    let step = CHUNK_WORDS - CHUNK_OVERLAP_WORDS;
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < words.len() {
        let end = (start + CHUNK_WORDS).min(words.len());
        chunks.push(Chunk {
            doc_id: doc.id.clone(),
            text: words[start..end].join(" "),
        });
        if end == words.len() {
            break;
        }
        start += step;
    }
    chunks
}

/// One retrieval hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<'a> {
    /// The matched chunk
    pub chunk: &'a Chunk,
    /// Cosine similarity to the query
    pub score: f32,
}

/// Brute-force cosine index over embedded chunks.
///
/// The document sets here are small (one per SNP), so a linear scan beats
/// any graph structure.
#[derive(Debug, Default)]
pub struct VectorIndex {
    chunks: Vec<Chunk>,
    embeddings: Vec<Vec<f32>>,
}

impl VectorIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble an index from chunks and their embeddings, in the same order.
    ///
    /// # Errors
    ///
    /// Returns an error when the two lengths differ.
    pub fn from_parts(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(SnpsumError::Engine(format!(
                "chunk/embedding count mismatch: {} chunks, {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        Ok(Self { chunks, embeddings })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Top-k chunks by cosine similarity to the query embedding.
    #[must_use]
    pub fn search(&self, query: &[f32], k: usize) -> Vec<Hit<'_>> {
        let mut hits: Vec<Hit<'_>> = self
            .chunks
            .iter()
            .zip(self.embeddings.iter())
            .map(|(chunk, embedding)| Hit {
                chunk,
                score: cosine_similarity(query, embedding),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        hits
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}
