//! Error types for snpsum operations.

use thiserror::Error;

/// Main error type for the snpsum pipeline
#[derive(Error, Debug)]
pub enum SnpsumError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The OpenAI API key is missing from the environment
    #[error("OPENAI_API_KEY not set")]
    MissingApiKey,

    /// The reference list is malformed or lacks the ID column
    #[error("Reference list error: {0}")]
    Reference(String),

    /// The variant file cannot be parsed
    #[error("VCF error: {0}")]
    Vcf(String),

    /// A literature table is malformed
    #[error("Literature error: {0}")]
    Literature(String),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Index build or query failure
    #[error("Engine error: {0}")]
    Engine(String),
}

/// Result type alias for snpsum operations
pub type Result<T> = std::result::Result<T, SnpsumError>;
