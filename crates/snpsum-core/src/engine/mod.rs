//! Retrieval index construction and querying.
//!
//! The pipeline only ever needs two operations from a backend: build an
//! index over the collected documents, then answer one prompt against it.
//! [`OpenAiEngine`] is the remote-backed implementation; tests substitute
//! their own.

mod index;
mod openai;

pub use index::{
    chunk_document, Chunk, Hit, VectorIndex, CHUNK_OVERLAP_WORDS, CHUNK_WORDS, DEFAULT_TOP_K,
};
pub use openai::{OpenAiClient, OpenAiEngine};

use async_trait::async_trait;

use crate::error::Result;
use crate::literature::AnnotatedSnp;

/// A document handed to the index builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier of the SNP the text belongs to
    pub id: String,
    /// Full document text
    pub text: String,
}

impl From<&AnnotatedSnp> for Document {
    fn from(snp: &AnnotatedSnp) -> Self {
        Self {
            id: snp.id.clone(),
            text: snp.content.clone(),
        }
    }
}

/// The two operations the pipeline needs from a retrieval backend.
#[async_trait]
pub trait SummaryEngine {
    /// Build the retrieval index over the given documents.
    async fn build(&mut self, documents: &[Document]) -> Result<()>;

    /// Answer one natural-language prompt against the built index.
    async fn query(&self, prompt: &str) -> Result<String>;
}

/// Direct single-text summarization, used by the per-SNP digest mode.
#[async_trait]
pub trait Summarizer {
    /// Summarize one document's text.
    async fn summarize(&self, text: &str) -> Result<String>;
}
